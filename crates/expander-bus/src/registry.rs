//! Expander registry and the poll cycle.

use embassy_time::Duration;
use embedded_hal_async::delay::DelayNs;
use heapless::Vec;

use crate::decode::{decode, LineState};
use crate::descriptor::{
    DeviceDescriptor, ExpanderDescriptor, ExpanderWidth, RawReading,
    PCF8574_ADDR, PCF8575_ADDR, STANDARD_MODE_HZ,
};
use crate::error::{BusError, RegistryError};
use crate::factory::BusFactory;
use crate::manager::BusSessionManager;

/// Upper bound on expanders sharing one bus.
pub const MAX_EXPANDERS: usize = 8;

const fn seven_bit(address: u8) -> DeviceDescriptor {
    match DeviceDescriptor::new(address, STANDARD_MODE_HZ) {
        Some(device) => device,
        None => panic!("expander address out of 7-bit range"),
    }
}

/// The expanders fitted on the board, in poll order.
pub const DEFAULT_EXPANDERS: [ExpanderDescriptor; 2] = [
    ExpanderDescriptor::new(
        seven_bit(PCF8574_ADDR),
        ExpanderWidth::Width8,
        "PCF8574",
    ),
    ExpanderDescriptor::new(
        seven_bit(PCF8575_ADDR),
        ExpanderWidth::Width16,
        "PCF8575",
    ),
];

/// Result of polling one expander.
pub type PollOutcome = (ExpanderDescriptor, Result<LineState, BusError>);

/// Results of one poll cycle, in registry order.
pub type PollResults = Vec<PollOutcome, MAX_EXPANDERS>;

/// Ordered, fixed list of expanders. Built once at startup.
#[derive(Debug, Clone)]
pub struct ExpansionRegistry {
    expanders: Vec<ExpanderDescriptor, MAX_EXPANDERS>,
}

impl ExpansionRegistry {
    pub const fn new() -> Self {
        Self { expanders: Vec::new() }
    }

    pub fn from_slice(
        expanders: &[ExpanderDescriptor],
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for expander in expanders {
            registry.push(*expander)?;
        }
        Ok(registry)
    }

    pub fn push(
        &mut self,
        expander: ExpanderDescriptor,
    ) -> Result<(), RegistryError> {
        self.expanders.push(expander).map_err(|_| RegistryError::Full)
    }

    pub fn get(&self, index: usize) -> Option<&ExpanderDescriptor> {
        self.expanders.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExpanderDescriptor> {
        self.expanders.iter()
    }

    pub fn len(&self) -> usize {
        self.expanders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanders.is_empty()
    }
}

impl Default for ExpansionRegistry {
    fn default() -> Self {
        let mut expanders = Vec::new();
        for expander in DEFAULT_EXPANDERS {
            // MAX_EXPANDERS is larger than the default table.
            let _ = expanders.push(expander);
        }
        Self { expanders }
    }
}

/// One structured report per polled expander.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollEvent {
    pub label: &'static str,
    pub address: u8,
    pub line_count: usize,
    pub outcome: Result<RawReading, BusError>,
}

/// Counts for one finished cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleSummary {
    pub ok: usize,
    pub failed: usize,
}

impl CycleSummary {
    pub fn from_results(results: &[PollOutcome]) -> Self {
        let ok = results.iter().filter(|(_, r)| r.is_ok()).count();
        Self { ok, failed: results.len() - ok }
    }

    /// Every expander in the cycle answered.
    pub fn all_ok(&self) -> bool {
        self.failed == 0
    }
}

/// Receives poll reports. Rendering them is up to the implementor.
pub trait PollSink {
    fn cycle_started(&mut self, _expanders: usize) {}

    fn reading(&mut self, event: &PollEvent);

    fn cycle_finished(&mut self, _summary: &CycleSummary) {}
}

/// Sink that drops every report.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl PollSink for NoopSink {
    fn reading(&mut self, _event: &PollEvent) {}
}

async fn poll_expander<F: BusFactory, S: PollSink>(
    manager: &mut BusSessionManager<F>,
    expander: &ExpanderDescriptor,
    sink: &mut S,
) -> Result<LineState, BusError> {
    let outcome = manager
        .perform_transaction(&expander.device, expander.width.byte_count())
        .await;

    sink.reading(&PollEvent {
        label: expander.label,
        address: expander.device.address(),
        line_count: expander.line_count(),
        outcome,
    });

    match outcome {
        Ok(raw) => {
            let lines = decode(&raw, expander.width);
            debug!("{=str}: {=u16:#x}", expander.label, lines.raw());
            Ok(lines)
        }
        Err(e) => {
            warn!(
                "{=str} at {=u8:#x} failed: {}",
                expander.label,
                expander.device.address(),
                e
            );
            Err(e)
        }
    }
}

/// Wait the whole of `duration`, in `u32` microsecond steps.
async fn wait<D: DelayNs>(delay: &mut D, duration: Duration) {
    let mut remaining = duration.as_micros();
    while remaining > 0 {
        let step = remaining.min(u64::from(u32::MAX));
        delay.delay_us(step as u32).await;
        remaining -= step;
    }
}

/// Read every expander once, in registry order.
///
/// A failing expander is recorded and the cycle moves on. After each
/// expander, success or not, the cycle waits `inter_read_delay`.
pub async fn poll_all<F, D, S>(
    manager: &mut BusSessionManager<F>,
    registry: &ExpansionRegistry,
    delay: &mut D,
    inter_read_delay: Duration,
    sink: &mut S,
) -> PollResults
where
    F: BusFactory,
    D: DelayNs,
    S: PollSink,
{
    let mut results = PollResults::new();

    sink.cycle_started(registry.len());
    for expander in registry.iter() {
        let outcome = poll_expander(manager, expander, sink).await;
        // Registry and results share the same capacity.
        let _ = results.push((*expander, outcome));
        wait(delay, inter_read_delay).await;
    }

    let summary = CycleSummary::from_results(&results);
    sink.cycle_finished(&summary);
    debug!("cycle done: {} ok, {} failed", summary.ok, summary.failed);

    results
}

/// Read a single expander by registry index.
pub async fn poll_one<F, S>(
    manager: &mut BusSessionManager<F>,
    registry: &ExpansionRegistry,
    index: usize,
    sink: &mut S,
) -> Result<PollOutcome, RegistryError>
where
    F: BusFactory,
    S: PollSink,
{
    let Some(expander) = registry.get(index) else {
        warn!("no expander at index {}", index);
        return Err(RegistryError::UnknownExpander(index));
    };
    let outcome = poll_expander(manager, expander, sink).await;
    Ok((*expander, outcome))
}
