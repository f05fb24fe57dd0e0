/// Assert that two `Shared<HealthComponent>` hold the same hit points
#[macro_export]
macro_rules! assert_health_synced {
    ($expected:expr, $actual:expr) => {
        let expected = netsync_shared::try_read(&$expected).unwrap();
        let actual = netsync_shared::try_read(&$actual).unwrap();
        assert_eq!(
            (actual.current(), actual.max()),
            (expected.current(), expected.max()),
            "Observer health does not match the authority"
        );
    };
}
