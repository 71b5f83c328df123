mod common;

use common::*;
use embassy_time::Duration;
use expander_bus::{
    BusConfig, BusError, BusSessionManager, DeviceDescriptor, DeviceSession,
    STANDARD_MODE_HZ,
};

fn dev(address: u8) -> DeviceDescriptor {
    DeviceDescriptor::new(address, STANDARD_MODE_HZ).unwrap()
}

#[futures_test::test]
async fn transaction_reads_requested_bytes() {
    let trace = new_trace();
    let mut mgr =
        make_manager(MockResources::new(&trace).reply(0x27, Ok(&[0x34, 0x12])));

    let raw = mgr.perform_transaction(&dev(0x27), 2).await.unwrap();
    assert_eq!(raw.as_bytes(), &[0x34, 0x12]);
    assert_eq!(
        *trace.borrow(),
        vec![Op::Attach(0x27), Op::Read(0x27, 2), Op::Detach(0x27)]
    );
    assert_eq!(mgr.bus().attached(), 0);
}

#[futures_test::test]
async fn failed_read_still_detaches() {
    for err in [BusError::Timeout, BusError::Nack, BusError::Transfer] {
        let trace = new_trace();
        let mut mgr = make_manager(MockResources::new(&trace).reply(0x20, Err(err)));

        let result = mgr.perform_transaction(&dev(0x20), 1).await;
        assert_eq!(result, Err(err));
        assert_eq!(mgr.bus().count(|op| matches!(op, Op::Attach(_))), 1);
        assert_eq!(mgr.bus().count(|op| matches!(op, Op::Detach(_))), 1);
        assert_eq!(mgr.bus().attached(), 0);
    }
}

#[futures_test::test]
async fn repeated_transactions_never_leak_slots() {
    let trace = new_trace();
    let mut mgr = make_manager(
        MockResources::new(&trace)
            .reply(0x20, Ok(&[0xAA]))
            .reply(0x27, Err(BusError::Timeout)),
    );

    // More rounds than the mock has device slots.
    for _ in 0..10 {
        assert!(mgr.perform_transaction(&dev(0x20), 1).await.is_ok());
        assert!(mgr.perform_transaction(&dev(0x27), 2).await.is_err());
    }
    assert_eq!(mgr.bus().count(|op| matches!(op, Op::Attach(_))), 20);
    assert_eq!(mgr.bus().count(|op| matches!(op, Op::Detach(_))), 20);
    assert_eq!(mgr.bus().attached(), 0);
}

#[futures_test::test]
async fn attach_failure_skips_read_and_detach() {
    let trace = new_trace();
    let mut resources = MockResources::new(&trace).reply(0x20, Ok(&[0x00]));
    resources.reject_attach = Some(0x20);
    let mut mgr = make_manager(resources);

    let result = mgr.perform_transaction(&dev(0x20), 1).await;
    assert_eq!(result, Err(BusError::AttachFailed));
    assert!(trace.borrow().is_empty());
}

#[futures_test::test]
async fn invalid_length_touches_nothing() {
    let trace = new_trace();
    let mut mgr = make_manager(MockResources::new(&trace));

    assert_eq!(
        mgr.perform_transaction(&dev(0x20), 0).await,
        Err(BusError::InvalidLength(0))
    );
    assert_eq!(
        mgr.perform_transaction(&dev(0x20), 3).await,
        Err(BusError::InvalidLength(3))
    );
    assert!(trace.borrow().is_empty());
}

#[futures_test::test]
async fn session_detaches_on_drop() {
    let trace = new_trace();
    let mgr = make_manager(MockResources::new(&trace).reply(0x20, Ok(&[0x01])));
    let mut resources = mgr.release();
    resources.replies.clear();
    let (mut bus, _) = {
        use expander_bus::BusFactory;
        match MockFactory::create(resources, &BusConfig::default()) {
            Ok(parts) => parts,
            Err(_) => panic!("mock bus failed to come up"),
        }
    };

    {
        let mut session = DeviceSession::open(&mut bus, &dev(0x20)).unwrap();
        let mut buf = [0u8; 1];
        let _ = session.receive(&mut buf, Duration::from_millis(1)).await;
    }
    assert_eq!(bus.attached(), 0);
    assert_eq!(trace.borrow().last(), Some(&Op::Detach(0x20)));
}

#[futures_test::test]
async fn dropped_transaction_future_still_detaches() {
    use core::future::Future;
    use core::pin::pin;
    use core::task::Poll;

    let trace = new_trace();
    let mut resources = MockResources::new(&trace);
    resources.stall = Some(0x20);
    let mut mgr = make_manager(resources);

    {
        let device = dev(0x20);
        let mut fut = pin!(mgr.perform_transaction(&device, 1));
        let mut cx = futures_test::task::noop_context();
        assert!(matches!(fut.as_mut().poll(&mut cx), Poll::Pending));
    }

    assert_eq!(mgr.bus().attached(), 0);
    assert_eq!(
        *trace.borrow(),
        vec![Op::Attach(0x20), Op::Read(0x20, 1), Op::Detach(0x20)]
    );
}

#[futures_test::test]
async fn init_failure_returns_resources() {
    let trace = new_trace();
    let mut resources = MockResources::new(&trace).reply(0x20, Ok(&[0x7F]));
    resources.fail_create = true;

    let (err, mut resources) =
        match BusSessionManager::<MockFactory>::init(resources, &BusConfig::default()) {
            Ok(_) => panic!("expected init to fail"),
            Err(parts) => parts,
        };
    assert_eq!(err, MockError);
    assert!(resources.replies.contains_key(&0x20));

    resources.fail_create = false;
    let mut mgr = make_manager(resources);
    let raw = mgr.perform_transaction(&dev(0x20), 1).await.unwrap();
    assert_eq!(raw.as_bytes(), &[0x7F]);
}

#[futures_test::test]
async fn release_recovers_resources() {
    let trace = new_trace();
    let mgr = make_manager(MockResources::new(&trace).reply(0x27, Ok(&[1, 2])));
    assert_eq!(mgr.timeout(), Duration::from_millis(1000));

    let resources = mgr.release();
    assert!(resources.replies.contains_key(&0x27));
}
