use embassy_time::Duration;
use embedded_hal_async::i2c::{
    ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation,
};
use expander_bus::{
    BusError, DeviceDescriptor, DeviceSession, ExpanderBus, I2cExpanderBus,
    STANDARD_MODE_HZ,
};

#[derive(Clone, Copy)]
enum Mode {
    /// Fill every read with the device address.
    Echo,
    Nack,
    Stall,
    Fault,
}

struct MockI2c {
    mode: Mode,
    reads: usize,
}

impl MockI2c {
    fn new(mode: Mode) -> Self {
        Self { mode, reads: 0 }
    }
}

impl ErrorType for MockI2c {
    type Error = ErrorKind;
}

impl I2c for MockI2c {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.reads += 1;
        match self.mode {
            Mode::Echo => {
                for op in operations {
                    if let Operation::Read(buf) = op {
                        buf.fill(address);
                    }
                }
                Ok(())
            }
            Mode::Nack => {
                Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address))
            }
            Mode::Stall => core::future::pending().await,
            Mode::Fault => Err(ErrorKind::Bus),
        }
    }
}

fn dev(address: u8, hz: u32) -> DeviceDescriptor {
    DeviceDescriptor::new(address, hz).unwrap()
}

async fn read_once(
    bus: &mut I2cExpanderBus<MockI2c>,
    device: &DeviceDescriptor,
    len: usize,
    timeout: Duration,
) -> Result<[u8; 2], BusError> {
    let mut session = DeviceSession::open(bus, device)?;
    let mut buf = [0u8; 2];
    session.receive(&mut buf[..len], timeout).await?;
    Ok(buf)
}

#[futures_test::test]
async fn reads_fill_the_buffer() {
    let mut bus = I2cExpanderBus::<_>::new(MockI2c::new(Mode::Echo), STANDARD_MODE_HZ);
    let device = dev(0x27, STANDARD_MODE_HZ);

    let buf = read_once(&mut bus, &device, 2, Duration::from_millis(100)).await;
    assert_eq!(buf, Ok([0x27, 0x27]));
    assert_eq!(bus.attached(), 0);
    assert_eq!(bus.into_inner().reads, 1);
}

#[futures_test::test]
async fn nack_maps_to_nack() {
    let mut bus = I2cExpanderBus::<_>::new(MockI2c::new(Mode::Nack), STANDARD_MODE_HZ);
    let device = dev(0x20, STANDARD_MODE_HZ);

    let result = read_once(&mut bus, &device, 1, Duration::from_millis(100)).await;
    assert_eq!(result, Err(BusError::Nack));
    assert_eq!(bus.attached(), 0);
}

#[futures_test::test]
async fn other_bus_errors_map_to_transfer() {
    let mut bus = I2cExpanderBus::<_>::new(MockI2c::new(Mode::Fault), STANDARD_MODE_HZ);
    let device = dev(0x20, STANDARD_MODE_HZ);

    let result = read_once(&mut bus, &device, 1, Duration::from_millis(100)).await;
    assert_eq!(result, Err(BusError::Transfer));
}

#[futures_test::test]
async fn stalled_read_times_out() {
    let mut bus = I2cExpanderBus::<_>::new(MockI2c::new(Mode::Stall), STANDARD_MODE_HZ);
    let device = dev(0x20, STANDARD_MODE_HZ);

    let result = read_once(&mut bus, &device, 1, Duration::from_millis(10)).await;
    assert_eq!(result, Err(BusError::Timeout));
    assert_eq!(bus.attached(), 0);
}

#[futures_test::test]
async fn device_faster_than_bus_is_refused() {
    let mut bus = I2cExpanderBus::<_>::new(MockI2c::new(Mode::Echo), STANDARD_MODE_HZ);

    assert_eq!(
        bus.attach(&dev(0x20, 400_000)),
        Err(BusError::AttachFailed)
    );
    assert_eq!(bus.attach(&dev(0x20, 0)), Err(BusError::AttachFailed));
    assert_eq!(bus.attached(), 0);
    assert_eq!(bus.into_inner().reads, 0);
}

#[futures_test::test]
async fn slower_device_is_accepted() {
    let mut bus = I2cExpanderBus::<_>::new(MockI2c::new(Mode::Echo), 400_000);
    let slot = bus.attach(&dev(0x20, STANDARD_MODE_HZ)).unwrap();
    assert_eq!(bus.attached(), 1);
    assert_eq!(bus.attach(&dev(0x20, STANDARD_MODE_HZ)), Err(BusError::AttachFailed));
    bus.detach(slot);
    assert_eq!(bus.attached(), 0);
}
