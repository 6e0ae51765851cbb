use ledger_crypto::Digest;

use crate::hex_bytes::HexBytes;
use crate::snapshot::{EventRequest, SnapshotResponse};

#[test]
fn event_request_round_trips_through_json() {
    let req = EventRequest {
        event: HexBytes(vec![0xDE, 0xAD, 0xBE, 0xEF]),
    };
    let encoded = serde_json::to_string(&req).unwrap();
    assert_eq!(encoded, r#"{"event":"deadbeef"}"#);

    let decoded: EventRequest = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded.event, req.event);
}

#[test]
fn snapshot_response_field_order_is_fixed() {
    let snapshot = SnapshotResponse {
        version: 3,
        event_digest: Digest::new(vec![0x01]),
        history_digest: Digest::new(vec![0x02]),
        hyper_digest: Digest::new(vec![0x03]),
    };
    let encoded = serde_json::to_string(&snapshot).unwrap();
    assert_eq!(
        encoded,
        r#"{"version":3,"event_digest":"01","history_digest":"02","hyper_digest":"03"}"#
    );
}

#[test]
fn snapshot_round_trip_is_byte_stable() {
    let snapshot = SnapshotResponse {
        version: 7,
        event_digest: Digest::new(vec![0xAA, 0xBB]),
        history_digest: Digest::new(vec![0xCC]),
        hyper_digest: Digest::new(vec![0xDD, 0xEE, 0xFF]),
    };
    let once = serde_json::to_string(&snapshot).unwrap();
    let decoded: SnapshotResponse = serde_json::from_str(&once).unwrap();
    let twice = serde_json::to_string(&decoded).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn malformed_hex_event_fails_to_decode() {
    let result: Result<EventRequest, _> = serde_json::from_str(r#"{"event":"not-hex"}"#);
    assert!(result.is_err());
}
