//! End-to-end page session against the mock server over reqwest.

mod common;

use std::time::Duration;

use autos_core::{ApiError, AutosClient, ClientConfig};
use autos_ui::{
    CarRecordClient, DeleteOutcome, FormMode, ReqwestTransport, Submitted, TableAction, TableView,
};
use common::{corolla_form, RecordingView, ScriptedDialogs};

async fn start_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));
    format!("http://{addr}/api")
}

#[tokio::test]
async fn page_session() {
    let config = ClientConfig {
        base_url: start_server().await,
        timeout: Some(Duration::from_secs(5)),
    };
    let page = CarRecordClient::from_config(
        &config,
        RecordingView::default(),
        ScriptedDialogs::answering(false),
    )
    .unwrap();

    // Page load against an empty store shows the placeholder only.
    page.on_page_loaded().await;
    let table = page.view().page().table.unwrap();
    assert!(matches!(table, TableView::Placeholder(_)));

    // Create: the server assigns an id and the table shows the new row.
    let Submitted::Created(created) = page.submit(&corolla_form()).await.unwrap() else {
        panic!("expected a create");
    };
    assert!(!created.id.is_empty());
    assert_eq!(
        page.view().page().row_lines(),
        ["Toyota | Corolla | 2020 | $15,000 | Manual"]
    );

    // Ids are sent as one path segment, so reserved characters cannot
    // address another resource.
    let err = page.load_for_edit(&format!("{}/../..", created.id)).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound { .. }));
    assert_eq!(page.list().await.unwrap().len(), 1);

    // Edit: the form shows exactly what the server holds.
    let row = page.view().page().table.unwrap().rows()[0].clone();
    page.on_table_action(row.edit_action()).await;
    assert_eq!(page.view().page().form, corolla_form());
    assert_eq!(page.mode(), FormMode::Edit { id: created.id.clone() });

    // Update replaces the record; clearing the description clears it remotely.
    let mut form = page.view().page().form;
    form.model = "Corolla Cross".to_string();
    form.price = "21000".to_string();
    form.description = String::new();
    let Submitted::Updated(updated) = page.submit(&form).await.unwrap() else {
        panic!("expected an update");
    };
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.car.description, "");
    let listed = page.list().await.unwrap();
    assert_eq!(listed, vec![updated.clone()]);
    assert_eq!(page.mode(), FormMode::Create);

    // Declined delete keeps the record.
    let outcome = page.delete(&created.id).await.unwrap();
    assert_eq!(outcome, DeleteOutcome::Cancelled);
    assert_eq!(page.list().await.unwrap().len(), 1);

    // Confirmed delete removes it and the placeholder returns.
    page.dialogs().set_answer(true);
    page.on_table_action(TableAction::Delete(created.id.clone())).await;
    let table = page.view().page().table.unwrap();
    assert!(matches!(table, TableView::Placeholder(_)));
    assert!(page.list().await.unwrap().is_empty());

    // Editing a record that no longer exists is reported, not fatal.
    assert!(page.load_for_edit(&created.id).await.is_err());
    assert_eq!(page.dialogs().alerts().len(), 2);
}

#[tokio::test]
async fn unreachable_server_is_not_fatal() {
    // Nothing listens on the discard port of the loopback address.
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(2))
        .build()
        .unwrap();
    let page = CarRecordClient::new(
        AutosClient::new("http://127.0.0.1:9/api"),
        ReqwestTransport::with_client(http),
        RecordingView::default(),
        ScriptedDialogs::answering(true),
    );

    let err = page.list().await.unwrap_err();
    assert!(err.is_transport());
    assert!(page.view().page().table.is_none());
    assert!(page.dialogs().alerts().is_empty());

    assert!(page.submit(&corolla_form()).await.is_err());
    assert_eq!(page.dialogs().alerts().len(), 1);
}
