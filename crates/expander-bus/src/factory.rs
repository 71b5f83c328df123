use crate::bus::ExpanderBus;
use crate::config::BusConfig;

/// Brings an expander bus up from raw peripherals and tears it down again.
///
/// The board crate implements this for its I2C peripheral; tests implement
/// it over a mock.
pub trait BusFactory {
    /// The bus owned by the session manager.
    type Bus: ExpanderBus;
    /// Peripheral handles and pins the bus is built from.
    type Resources;
    /// Token kept alongside the bus, traded back for the resources.
    type Destructor;
    /// Why a configuration could not be applied.
    type Error: core::fmt::Debug;

    /// Configure the peripheral for `config`.
    ///
    /// A rejected configuration hands `resources` back untouched.
    #[allow(clippy::type_complexity)]
    fn create(
        resources: Self::Resources,
        config: &BusConfig,
    ) -> Result<(Self::Bus, Self::Destructor), (Self::Error, Self::Resources)>;

    /// Rebuild the resources once the bus has been dropped.
    fn recover(destructor: Self::Destructor) -> Self::Resources;
}
