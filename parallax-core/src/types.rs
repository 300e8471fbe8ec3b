/// Identifier for a layer in a [`crate::controller::ScrollController`].
///
/// This is an index into the controller's layer list, and is only meaningful
/// for the controller that produced it.
pub type LayerId = usize;

/// Selects how layers follow the reference point each tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScrollBehaviour {
    /// Position is recomputed from the total reference displacement since
    /// setup. Anything else that moved the layer is overwritten.
    Absolute,
    /// Position accumulates the reference's per-tick movement, so other
    /// systems may move the layer between ticks.
    #[default]
    Relative,
}
