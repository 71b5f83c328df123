#![no_std]
#![no_main]

use embassy_executor::Spawner;

#[cfg(feature = "defmt")]
use defmt_rtt as _;
#[cfg(feature = "defmt")]
use panic_probe as _;
#[cfg(not(feature = "defmt"))]
use panic_reset as _;

use relay_app::prelude::*;
use static_cell::StaticCell;

static RELAYS: StaticCell<Relays> = StaticCell::new();

// Application main entry point. The spawner can be used to start async tasks.
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("relay controller {=str} on {=str}", FW_VERSION, HW_VERSION);
    let board = RelayBoard::default();

    spawner.must_spawn(watchdog_task(board.wdt));

    // Relays come up released before anything touches the bus.
    let relays = RELAYS.init(board.relay_resources.configure());
    debug!("{} relays released", relays.len());

    let poll_config = PollConfig::default();
    let manager = unwrap!(ExpanderBusManager::init(
        board.twim_bus_resources,
        &BusConfig::default(),
    )
    .map_err(|(e, _)| e))
    .with_timeout(poll_config.timeout());

    // The RTC shares the bus but is not polled.
    debug!("DS3231 reserved at {=u8:#04x}", DS3231_ADDR);

    spawner.must_spawn(poll_task(
        manager,
        ExpansionRegistry::default(),
        poll_config,
    ));
}
