//! Post-render enhancement hook (tooltips).

/// What activates a tooltip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TooltipTrigger {
    /// Pointer over the element.
    #[default]
    Hover,
}

/// An element flagged for tooltip behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipTarget {
    /// Stable element id, used by the renderer to locate the element.
    pub id: &'static str,
    pub text: String,
    pub trigger: TooltipTrigger,
}

/// Capability that attaches cosmetic behavior to rendered elements.
///
/// Called once per mount with every flagged element.
pub trait Decorate {
    fn decorate(&mut self, targets: &[TooltipTarget]);
}
