use embassy_time::Duration;

use crate::config::{BusConfig, TRANSACTION_TIMEOUT_MS};
use crate::descriptor::{DeviceDescriptor, RawReading};
use crate::error::BusError;
use crate::factory::BusFactory;
use crate::session::DeviceSession;

const MAX_READ_LEN: usize = 2;

/// Exclusive owner of the expander bus.
///
/// Every transaction takes `&mut self`, so two sessions can never overlap on
/// the same bus. The bus lives until [`release`](Self::release) hands the
/// peripheral resources back.
pub struct BusSessionManager<F: BusFactory> {
    bus: F::Bus,
    destructor: F::Destructor,
    timeout: Duration,
}

impl<F: BusFactory> BusSessionManager<F> {
    /// Bring up the bus from its resources.
    ///
    /// On failure the resources come back with the error so the caller can
    /// retry with a different configuration.
    #[allow(clippy::type_complexity)]
    pub fn init(
        resources: F::Resources,
        config: &BusConfig,
    ) -> Result<Self, (F::Error, F::Resources)> {
        let (bus, destructor) = F::create(resources, config)?;
        debug!("expander bus up at {} Hz", config.frequency_hz);
        Ok(Self {
            bus,
            destructor,
            timeout: Duration::from_millis(TRANSACTION_TIMEOUT_MS),
        })
    }

    /// Override the per-transaction read timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Attach `device`, read `read_len` bytes, detach.
    ///
    /// Exactly one attach and one detach happen per call once the attach
    /// succeeds, whatever the read outcome. Errors are returned as-is; this
    /// layer never retries.
    pub async fn perform_transaction(
        &mut self,
        device: &DeviceDescriptor,
        read_len: usize,
    ) -> Result<RawReading, BusError> {
        if read_len == 0 || read_len > MAX_READ_LEN {
            return Err(BusError::InvalidLength(read_len));
        }

        let mut buffer = [0u8; MAX_READ_LEN];
        {
            let mut session = DeviceSession::open(&mut self.bus, device)?;
            session.receive(&mut buffer[..read_len], self.timeout).await?;
        }
        trace!("read {=[u8]} from {=u8:#x}", &buffer[..read_len], device.address());

        RawReading::new(&buffer[..read_len])
    }

    /// Returns a reference to the underlying bus.
    pub fn bus(&self) -> &F::Bus {
        &self.bus
    }

    /// Tear the bus down and recover the original resources.
    pub fn release(self) -> F::Resources {
        let Self { bus, destructor, .. } = self;
        drop(bus);
        F::recover(destructor)
    }
}
