#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use embassy_time::Duration;
use embedded_hal_async::delay::DelayNs;
use expander_bus::{
    AttachedDevice, BusConfig, BusError, BusFactory, BusSessionManager,
    DeviceDescriptor, DeviceSlots, ExpanderBus, PollEvent, PollSink,
    CycleSummary,
};

// ---------------------------------------------------------------------------
// Shared trace of everything the mocks saw, in order
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Attach(u8),
    Read(u8, usize),
    Detach(u8),
    DelayUs(u32),
}

pub type Trace = Rc<RefCell<Vec<Op>>>;

// ---------------------------------------------------------------------------
// Mock bus
// ---------------------------------------------------------------------------

pub struct MockBus {
    trace: Trace,
    replies: HashMap<u8, Result<Vec<u8>, BusError>>,
    slots: DeviceSlots<4>,
    reject_attach: Option<u8>,
    stall: Option<u8>,
}

impl MockBus {
    pub fn attached(&self) -> usize {
        self.slots.len()
    }

    pub fn count(&self, f: impl Fn(&Op) -> bool) -> usize {
        self.trace.borrow().iter().filter(|op| f(op)).count()
    }
}

impl ExpanderBus for MockBus {
    type Slot = AttachedDevice;

    fn attach(
        &mut self,
        device: &DeviceDescriptor,
    ) -> Result<Self::Slot, BusError> {
        if self.reject_attach == Some(device.address()) {
            return Err(BusError::AttachFailed);
        }
        let slot = self.slots.attach(device)?;
        self.trace.borrow_mut().push(Op::Attach(device.address()));
        Ok(slot)
    }

    fn detach(&mut self, slot: Self::Slot) {
        self.trace.borrow_mut().push(Op::Detach(slot.address()));
        self.slots.detach(slot);
    }

    async fn receive(
        &mut self,
        slot: &Self::Slot,
        buffer: &mut [u8],
        _timeout: Duration,
    ) -> Result<(), BusError> {
        self.trace.borrow_mut().push(Op::Read(slot.address(), buffer.len()));
        if self.stall == Some(slot.address()) {
            core::future::pending::<()>().await;
        }
        match self.replies.get(&slot.address()) {
            Some(Ok(bytes)) if bytes.len() == buffer.len() => {
                buffer.copy_from_slice(bytes);
                Ok(())
            }
            Some(Ok(_)) => Err(BusError::Transfer),
            Some(Err(e)) => Err(*e),
            None => Err(BusError::Nack),
        }
    }
}

// ---------------------------------------------------------------------------
// Mock factory
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct MockResources {
    pub trace: Trace,
    pub replies: HashMap<u8, Result<Vec<u8>, BusError>>,
    pub reject_attach: Option<u8>,
    pub stall: Option<u8>,
    pub fail_create: bool,
}

impl MockResources {
    pub fn new(trace: &Trace) -> Self {
        Self {
            trace: trace.clone(),
            replies: HashMap::new(),
            reject_attach: None,
            stall: None,
            fail_create: false,
        }
    }

    pub fn reply(mut self, address: u8, reply: Result<&[u8], BusError>) -> Self {
        self.replies.insert(address, reply.map(|b| b.to_vec()));
        self
    }
}

#[derive(Debug, PartialEq)]
pub struct MockError;

pub struct MockFactory;

impl BusFactory for MockFactory {
    type Bus = MockBus;
    type Resources = MockResources;
    type Destructor = MockResources;
    type Error = MockError;

    fn create(
        resources: Self::Resources,
        _config: &BusConfig,
    ) -> Result<(Self::Bus, Self::Destructor), (Self::Error, Self::Resources)>
    {
        if resources.fail_create {
            return Err((MockError, resources));
        }
        let bus = MockBus {
            trace: resources.trace.clone(),
            replies: resources.replies.clone(),
            slots: DeviceSlots::new(),
            reject_attach: resources.reject_attach,
            stall: resources.stall,
        };
        Ok((bus, resources))
    }

    fn recover(destructor: Self::Destructor) -> Self::Resources {
        destructor
    }
}

pub fn make_manager(resources: MockResources) -> BusSessionManager<MockFactory> {
    match BusSessionManager::init(resources, &BusConfig::default()) {
        Ok(manager) => manager,
        Err(_) => panic!("mock bus failed to come up"),
    }
}

// ---------------------------------------------------------------------------
// Delay and sink
// ---------------------------------------------------------------------------

pub struct RecordingDelay {
    pub trace: Trace,
}

impl DelayNs for RecordingDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.trace.borrow_mut().push(Op::DelayUs(ns / 1_000));
    }

    async fn delay_us(&mut self, us: u32) {
        self.trace.borrow_mut().push(Op::DelayUs(us));
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.trace.borrow_mut().push(Op::DelayUs(ms * 1_000));
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub started: Vec<usize>,
    pub events: Vec<PollEvent>,
    pub summaries: Vec<CycleSummary>,
}

impl PollSink for RecordingSink {
    fn cycle_started(&mut self, expanders: usize) {
        self.started.push(expanders);
    }

    fn reading(&mut self, event: &PollEvent) {
        self.events.push(*event);
    }

    fn cycle_finished(&mut self, summary: &CycleSummary) {
        self.summaries.push(*summary);
    }
}

pub fn new_trace() -> Trace {
    Rc::new(RefCell::new(Vec::new()))
}
