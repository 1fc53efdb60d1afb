#[cfg(test)]
mod tests {
    use lapclock::libs::ticker::{Ticker, MIN_PERIOD_MS};
    use std::time::Duration;
    use test_context::{test_context, AsyncTestContext};
    use tokio::time::timeout;

    struct TickerTestContext {
        ticker: Ticker,
        wait: Duration,
    }

    impl AsyncTestContext for TickerTestContext {
        async fn setup() -> Self {
            TickerTestContext {
                ticker: Ticker::new(10),
                wait: Duration::from_millis(50),
            }
        }
    }

    #[test]
    fn test_period_is_clamped() {
        assert_eq!(Ticker::new(0).period(), Duration::from_millis(MIN_PERIOD_MS));
        assert_eq!(Ticker::new(50).period(), Duration::from_millis(50));
    }

    #[test_context(TickerTestContext)]
    #[tokio::test]
    async fn test_disarmed_ticker_never_fires(ctx: &mut TickerTestContext) {
        assert!(!ctx.ticker.is_armed());
        assert!(timeout(ctx.wait, ctx.ticker.tick()).await.is_err());
    }

    #[test_context(TickerTestContext)]
    #[tokio::test]
    async fn test_armed_ticker_fires(ctx: &mut TickerTestContext) {
        ctx.ticker.sync(true);
        assert!(ctx.ticker.is_armed());
        assert!(timeout(ctx.wait * 10, ctx.ticker.tick()).await.is_ok());

        // Syncing to the same state keeps the running interval.
        ctx.ticker.sync(true);
        assert!(ctx.ticker.is_armed());

        ctx.ticker.sync(false);
        assert!(!ctx.ticker.is_armed());
        assert!(timeout(ctx.wait, ctx.ticker.tick()).await.is_err());
    }
}
