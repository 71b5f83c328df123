use embassy_time::{Delay, Timer};
use expander_bus::{poll_all, ExpansionRegistry, PollConfig};

use crate::bus_manager::ExpanderBusManager;
use crate::sink::DefmtSink;

/// Poll every registered expander forever, pausing between cycles.
#[embassy_executor::task]
pub async fn poll_task(
    mut manager: ExpanderBusManager,
    registry: ExpansionRegistry,
    config: PollConfig,
) {
    crate::info!(
        "polling {} expanders every {} ms",
        registry.len(),
        config.cycle_delay_ms
    );
    let mut delay = Delay;
    let mut sink = DefmtSink;

    loop {
        poll_all(
            &mut manager,
            &registry,
            &mut delay,
            config.inter_read_delay(),
            &mut sink,
        )
        .await;
        Timer::after(config.cycle_delay()).await;
    }
}
