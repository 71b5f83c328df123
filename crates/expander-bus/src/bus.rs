use embassy_time::{with_timeout, Duration};
use embedded_hal_async::i2c::{Error as _, I2c};
use heapless::Vec;

use crate::descriptor::DeviceDescriptor;
use crate::error::BusError;

/// A shared bus that devices are attached to for the span of one transaction.
///
/// `attach` registers a device and hands back a slot token. The token is the
/// only way to address the device and must be given back through `detach`.
/// Callers go through [`DeviceSession`](crate::DeviceSession), which does that
/// on every exit path.
#[allow(async_fn_in_trait)]
pub trait ExpanderBus {
    /// Transient registration of one device on the bus.
    type Slot;

    fn attach(
        &mut self,
        device: &DeviceDescriptor,
    ) -> Result<Self::Slot, BusError>;

    fn detach(&mut self, slot: Self::Slot);

    /// Read exactly `buffer.len()` bytes, giving up after `timeout`.
    async fn receive(
        &mut self,
        slot: &Self::Slot,
        buffer: &mut [u8],
        timeout: Duration,
    ) -> Result<(), BusError>;
}

/// Registration token handed out by [`DeviceSlots`].
///
/// Not `Clone`: a device is detached exactly once.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AttachedDevice {
    address: u8,
    clock_speed_hz: u32,
}

impl AttachedDevice {
    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn clock_speed_hz(&self) -> u32 {
        self.clock_speed_hz
    }
}

/// Fixed-capacity table of devices currently attached to a bus.
///
/// For peripherals that have no native device registration, this provides
/// the same contract: one slot per address, bounded capacity.
pub struct DeviceSlots<const N: usize> {
    attached: Vec<DeviceDescriptor, N>,
}

impl<const N: usize> DeviceSlots<N> {
    pub const fn new() -> Self {
        Self { attached: Vec::new() }
    }

    pub fn attach(
        &mut self,
        device: &DeviceDescriptor,
    ) -> Result<AttachedDevice, BusError> {
        if self.is_attached(device.address()) {
            return Err(BusError::AttachFailed);
        }
        self.attached.push(*device).map_err(|_| BusError::AttachFailed)?;
        Ok(AttachedDevice {
            address: device.address(),
            clock_speed_hz: device.clock_speed_hz(),
        })
    }

    pub fn detach(&mut self, device: AttachedDevice) {
        if let Some(pos) =
            self.attached.iter().position(|d| d.address() == device.address)
        {
            self.attached.swap_remove(pos);
        }
    }

    pub fn is_attached(&self, address: u8) -> bool {
        self.attached.iter().any(|d| d.address() == address)
    }

    pub fn len(&self) -> usize {
        self.attached.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attached.is_empty()
    }
}

impl<const N: usize> Default for DeviceSlots<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// [`ExpanderBus`] over any async `embedded-hal` I2C master.
///
/// Devices faster than the configured bus clock are refused at attach time.
pub struct I2cExpanderBus<I2C, const N: usize = 4> {
    i2c: I2C,
    slots: DeviceSlots<N>,
    bus_speed_hz: u32,
}

impl<I2C: I2c, const N: usize> I2cExpanderBus<I2C, N> {
    pub fn new(i2c: I2C, bus_speed_hz: u32) -> Self {
        Self { i2c, slots: DeviceSlots::new(), bus_speed_hz }
    }

    pub fn attached(&self) -> usize {
        self.slots.len()
    }

    pub fn into_inner(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c, const N: usize> ExpanderBus for I2cExpanderBus<I2C, N> {
    type Slot = AttachedDevice;

    fn attach(
        &mut self,
        device: &DeviceDescriptor,
    ) -> Result<Self::Slot, BusError> {
        if device.clock_speed_hz() == 0
            || device.clock_speed_hz() > self.bus_speed_hz
        {
            return Err(BusError::AttachFailed);
        }
        self.slots.attach(device)
    }

    fn detach(&mut self, slot: Self::Slot) {
        self.slots.detach(slot);
    }

    async fn receive(
        &mut self,
        slot: &Self::Slot,
        buffer: &mut [u8],
        timeout: Duration,
    ) -> Result<(), BusError> {
        match with_timeout(timeout, self.i2c.read(slot.address(), buffer))
            .await
        {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(e.kind().into()),
            Err(_) => Err(BusError::Timeout),
        }
    }
}
