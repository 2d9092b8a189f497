// SPDX-FileCopyrightText: © 2026 fnbridge contributors
// SPDX-License-Identifier: MIT

/// Demo handlers bundled with the bootstrap executable, selectable by name.
pub mod handlers;
