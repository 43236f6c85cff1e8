#![cfg(test)]
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;

use tiny_http::{Header, Response, Server};

use medscan_common::record::VerificationOutcome;
use medscan_common::view::{Panel, ViewState, render};
use medscan_core::verifier::{LiveVerifier, Verifier};

/// Serves `body` with `status` to a single request and reports the path it
/// was asked for.
fn serve_once(status: u16, body: &'static str) -> (String, mpsc::Receiver<String>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let port = server.server_addr().to_ip().unwrap().port();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        if let Ok(req) = server.recv() {
            let _ = tx.send(req.url().to_string());
            let header = Header::from_bytes("Content-Type", "application/json").unwrap();
            let _ = req.respond(
                Response::from_string(body)
                    .with_status_code(status)
                    .with_header(header),
            );
        }
    });

    (format!("http://127.0.0.1:{port}"), rx)
}

#[tokio::test]
async fn live_authentic_medicine() {
    let (base, paths) = serve_once(
        200,
        r#"{"valid":true,"medicine":{"name":"Amoxicillin","batchNumber":"AMX-7","manufacturer":"Acme Pharma","mfgDate":1700000000,"expiryDate":"2030-01-01"}}"#,
    );

    let outcome = LiveVerifier::new(base).verify("0xABC").await;

    assert_eq!(paths.recv().unwrap(), "/api/verify/0xABC");
    let VerificationOutcome::Authentic(record) = outcome else {
        panic!("expected an authentic outcome, got {outcome:?}");
    };
    assert_eq!(record.name, "Amoxicillin");
    assert_eq!(record.batch_number, "AMX-7");
    assert_eq!(record.manufacturer, "Acme Pharma");
    assert_eq!(record.manufacture_date, "Nov 14, 2023");
    assert_eq!(record.expiry_date, "Jan 1, 2030");
    assert_eq!(record.identifier, "0xABC");
}

#[tokio::test]
async fn live_alternate_spellings() {
    let (base, _paths) = serve_once(
        200,
        r#"{"valid":true,"medicine":{"medicineName":"Ibuprofen","batchNumber":"IB-1","manufacturerName":"Generic Labs"}}"#,
    );

    let outcome = LiveVerifier::new(base).verify("0x1").await;

    let VerificationOutcome::Authentic(record) = outcome else {
        panic!("expected an authentic outcome, got {outcome:?}");
    };
    assert_eq!(record.name, "Ibuprofen");
    assert_eq!(record.manufacturer, "Generic Labs");
    assert_eq!(record.manufacture_date, "N/A");
    assert_eq!(record.expiry_date, "N/A");
}

#[tokio::test]
async fn live_unregistered_medicine() {
    let (base, _paths) = serve_once(200, r#"{"valid":false}"#);
    let outcome = LiveVerifier::new(base).verify("0xDEAD").await;
    assert_eq!(outcome, VerificationOutcome::NotFound);
}

#[tokio::test]
async fn live_not_found_status() {
    let (base, _paths) = serve_once(404, r#"{"error":"unknown"}"#);
    let outcome = LiveVerifier::new(base).verify("0xDEAD").await;
    assert_eq!(outcome, VerificationOutcome::NotFound);
}

#[tokio::test]
async fn live_malformed_body() {
    let (base, _paths) = serve_once(200, "<html>maintenance</html>");
    let outcome = LiveVerifier::new(base).verify("0xDEAD").await;
    assert!(matches!(outcome, VerificationOutcome::TransportError(_)));
}

#[tokio::test]
async fn live_unreachable_service() {
    // Grab a free port, then release it so nothing is listening.
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let outcome = LiveVerifier::new(format!("http://127.0.0.1:{port}"))
        .verify("0xABC")
        .await;

    assert!(matches!(outcome, VerificationOutcome::TransportError(_)));

    let screen = render(&ViewState::Outcome(outcome));
    for (panel, visible) in screen.visibility() {
        assert_eq!(visible, panel == Panel::Error, "{panel:?}");
    }
    assert_eq!(
        screen.message(),
        "Cannot reach the verification service. Please check your internet connection."
    );
}
