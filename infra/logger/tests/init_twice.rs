use spechub_logger::{Logger, LoggerError};

#[test]
fn second_install_is_a_subscriber_error() {
    let _first = Logger::builder().name("spechub-first").init().expect("first install");

    let second = Logger::builder().name("spechub-second").init();

    assert!(matches!(second, Err(LoggerError::Subscriber { .. })), "{second:?}");
}
