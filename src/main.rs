use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::sync::Arc;
use tixgate::application::notifications::NotificationFanout;
use tixgate::application::payouts::PayoutWorkflow;
use tixgate::application::reconciler::Reconciler;
use tixgate::config::Config;
use tixgate::infrastructure::in_memory::{
    InMemoryEventStore, InMemoryNotificationStore, InMemoryPayoutStore,
    InMemoryProcessedDepositStore, InMemoryTicketStore, InMemoryUserStore,
};
use tixgate::interfaces::http::{router, AppState};
use tixgate::interfaces::provider::ProviderGateway;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tixgate=info")),
        )
        .init();

    let config = Config::parse();
    let gateway = ProviderGateway::new(&config.provider()).into_diagnostic()?;

    let users = InMemoryUserStore::new();
    let reconciler = Reconciler::new(
        Box::new(users.clone()),
        Box::new(InMemoryTicketStore::new()),
        Box::new(InMemoryEventStore::new()),
        Box::new(InMemoryProcessedDepositStore::new()),
    );
    let payouts = PayoutWorkflow::new(Box::new(InMemoryPayoutStore::new()));
    let fanout = NotificationFanout::new(
        Box::new(users),
        Box::new(InMemoryNotificationStore::new()),
    );

    let state = AppState {
        reconciler: Arc::new(reconciler),
        payouts: Arc::new(payouts),
        fanout: Arc::new(fanout),
        gateway: Arc::new(gateway),
    };

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .into_diagnostic()?;
    info!(addr = %config.bind_addr, "callback server listening");
    axum::serve(listener, router(state)).await.into_diagnostic()?;

    Ok(())
}
