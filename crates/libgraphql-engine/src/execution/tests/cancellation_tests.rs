use crate::execution::GraphQueryExecutionContext;
use crate::execution::GraphQueryRequest;
use crate::execution::MonitorState;
use crate::execution::QueryCancellationMonitor;
use crate::execution::tests::data;
use crate::execution::tests::execute_with;
use crate::execution::tests::message_codes;
use crate::messages::codes;
use crate::schema::Schema;
use crate::schema::SchemaOptions;
use crate::schema::resolver_fn;
use crate::test_utils::test_schema_builder;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

fn slow_schema(options: SchemaOptions) -> Arc<Schema> {
    Arc::new(
        test_schema_builder()
            .with_options(options)
            .field_resolver("Query", "hello", resolver_fn(|_| async {
                tokio::time::sleep(Duration::from_secs(10)).await;
                Ok(json!("finally"))
            }))
            .build()
            .unwrap(),
    )
}

fn with_timeout(timeout_ms: u64) -> SchemaOptions {
    SchemaOptions {
        query_timeout_ms: Some(timeout_ms),
        ..Default::default()
    }
}

fn request(token: &CancellationToken) -> GraphQueryExecutionContext {
    GraphQueryExecutionContext::new(GraphQueryRequest::new("{ hello }"))
        .with_cancellation_token(token.clone())
}

mod requests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn cancelled_before_start_produces_nothing() {
        let token = CancellationToken::new();
        token.cancel();

        let (result, listener) = execute_with(slow_schema(SchemaOptions::default()), request(&token)).await;

        assert!(result.data().is_none());
        assert!(result.messages().is_empty());
        assert!(listener.events().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_during_execution_discards_data() {
        let token = CancellationToken::new();
        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            canceller.cancel();
        });

        let (result, listener) = execute_with(slow_schema(SchemaOptions::default()), request(&token)).await;

        assert!(result.data().is_none());
        assert_eq!(message_codes(&result), vec![codes::OPERATION_CANCELED]);
        assert_eq!(listener.count("request_cancelled"), 1);
        assert_eq!(listener.count("request_completed"), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn exceeding_the_timeout_reports_it() {
        let token = CancellationToken::new();

        let (result, listener) = execute_with(slow_schema(with_timeout(50)), request(&token)).await;

        assert!(result.data().is_none());
        assert_eq!(message_codes(&result), vec![codes::OPERATION_TIMEOUT]);
        assert!(result.messages().iter().next().unwrap().message().contains("50ms"));
        assert_eq!(listener.count("request_timed_out"), 1);
        assert_eq!(listener.count("request_completed"), 1);
        assert!(!token.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn work_finishing_within_the_timeout_completes_normally() {
        let token = CancellationToken::new();

        let (result, listener) = execute_with(slow_schema(with_timeout(60_000)), request(&token)).await;

        assert_eq!(data(&result), &json!({ "hello": "finally" }));
        assert_eq!(listener.count("request_timed_out"), 0);
        assert_eq!(listener.count("request_completed"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn resolvers_can_observe_cancellation() {
        let schema = Arc::new(
            test_schema_builder()
                .field_resolver("Query", "hello", resolver_fn(|ctx| async move {
                    ctx.cancellation_token().cancelled().await;
                    Ok(json!("stopped"))
                }))
                .build()
                .unwrap(),
        );
        let token = CancellationToken::new();
        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            canceller.cancel();
        });

        let (result, _) = execute_with(schema, request(&token)).await;

        assert_eq!(message_codes(&result), vec![codes::OPERATION_CANCELED]);
    }
}

mod monitor {
    use super::*;

    #[test]
    fn starts_only_once() {
        let monitor = QueryCancellationMonitor::new(CancellationToken::new(), None);
        assert_eq!(monitor.state(), MonitorState::Created);

        assert!(monitor.start());
        assert!(!monitor.start());
        assert_eq!(monitor.state(), MonitorState::Started);
    }

    #[test]
    fn completing_an_unstarted_monitor_is_ignored() {
        let monitor = QueryCancellationMonitor::new(CancellationToken::new(), None);

        assert!(!monitor.complete());
        assert_eq!(monitor.state(), MonitorState::Created);
    }

    #[tokio::test]
    async fn waiting_on_an_unstarted_monitor_returns_immediately() {
        let monitor = QueryCancellationMonitor::new(CancellationToken::new(), None);

        assert_eq!(monitor.wait().await, MonitorState::Created);
    }

    #[tokio::test]
    async fn external_cancellation_wins_over_no_timeout() {
        let token = CancellationToken::new();
        let monitor = QueryCancellationMonitor::new(token.clone(), None);
        monitor.start();
        token.cancel();

        assert_eq!(monitor.wait().await, MonitorState::Cancelled);
        assert!(!monitor.complete());
        assert_eq!(monitor.state(), MonitorState::Cancelled);
    }

    #[tokio::test(start_paused = true)]
    async fn timer_expiry_times_out() {
        let monitor = QueryCancellationMonitor::new(
            CancellationToken::new(),
            Some(Duration::from_millis(5)),
        );
        monitor.start();

        assert_eq!(monitor.wait().await, MonitorState::TimedOut);
        assert!(monitor.state().is_terminal());
    }

    #[tokio::test]
    async fn completion_is_final() {
        let token = CancellationToken::new();
        let monitor = QueryCancellationMonitor::new(token.clone(), Some(Duration::from_secs(1)));
        monitor.start();

        assert!(monitor.complete());
        token.cancel();

        assert_eq!(monitor.wait().await, MonitorState::Completed);
    }
}
