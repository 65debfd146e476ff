//! Gallery user interface panels.

/// Collapsible navigation sidebar listing every page.
pub mod sidebar;

/// Page-populated parameter panel.
pub mod parameter_panel;
