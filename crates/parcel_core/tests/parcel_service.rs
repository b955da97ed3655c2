mod common;

use common::{ClientIdSource, RandomClientIds};
use parcel_core::db::open_db_in_memory;
use parcel_core::{
    ParcelService, ParcelStatus, ParcelStore, RepoError, ServiceError, SqliteParcelStore,
};

#[test]
fn register_stamps_registered_parcel() {
    let conn = open_db_in_memory().unwrap();
    let service = ParcelService::new(SqliteParcelStore::try_new(&conn).unwrap());

    let parcel = service.register(10, "Psk, Lenina 1").unwrap();

    assert!(parcel.number > 0);
    assert!(parcel.is_registered());
    parcel.validate().unwrap();
    assert_eq!(service.parcel(parcel.number).unwrap(), parcel);
}

#[test]
fn next_status_walks_workflow_and_stops_at_delivered() {
    let conn = open_db_in_memory().unwrap();
    let service = ParcelService::new(SqliteParcelStore::try_new(&conn).unwrap());
    let number = service.register(10, "a").unwrap().number;

    assert_eq!(service.next_status(number).unwrap(), ParcelStatus::Sent);
    assert_eq!(service.next_status(number).unwrap(), ParcelStatus::Delivered);

    let err = service.next_status(number).unwrap_err();
    assert!(matches!(err, ServiceError::FinalStatus(n) if n == number));
    assert_eq!(service.parcel(number).unwrap().status, "delivered");
}

#[test]
fn next_status_rejects_unknown_status() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteParcelStore::try_new(&conn).unwrap();
    let service = ParcelService::new(SqliteParcelStore::try_new(&conn).unwrap());
    let number = service.register(10, "a").unwrap().number;
    store.set_status(number, "lost").unwrap();

    match service.next_status(number).unwrap_err() {
        ServiceError::UnknownStatus { status, .. } => assert_eq!(status, "lost"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn next_status_on_missing_parcel_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = ParcelService::new(SqliteParcelStore::try_new(&conn).unwrap());

    assert!(matches!(
        service.next_status(9).unwrap_err(),
        ServiceError::Repo(RepoError::NotFound(9))
    ));
}

#[test]
fn change_address_and_delete_only_before_sending() {
    let conn = open_db_in_memory().unwrap();
    let service = ParcelService::new(SqliteParcelStore::try_new(&conn).unwrap());

    let editable = service.register(10, "old").unwrap().number;
    service.change_address(editable, "new").unwrap();
    assert_eq!(service.parcel(editable).unwrap().address, "new");
    service.delete(editable).unwrap();

    let sent = service.register(10, "fixed").unwrap().number;
    service.next_status(sent).unwrap();
    assert!(matches!(
        service.change_address(sent, "other").unwrap_err(),
        ServiceError::Repo(RepoError::GateNotSatisfied { .. })
    ));
    assert!(matches!(
        service.delete(sent).unwrap_err(),
        ServiceError::Repo(RepoError::GateNotSatisfied { .. })
    ));

    let remaining = service.client_parcels(10).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].number, sent);
    assert_eq!(remaining[0].address, "fixed");
}

#[test]
fn client_parcels_separates_clients() {
    let conn = open_db_in_memory().unwrap();
    let service = ParcelService::new(SqliteParcelStore::try_new(&conn).unwrap());
    let mut clients = RandomClientIds::seeded(7);
    let alice = clients.next_client();
    let bob = clients.next_client();

    service.register(alice, "a1").unwrap();
    service.register(bob, "b1").unwrap();
    service.register(alice, "a2").unwrap();

    let mut addresses: Vec<_> = service
        .client_parcels(alice)
        .unwrap()
        .into_iter()
        .map(|parcel| parcel.address)
        .collect();
    addresses.sort();
    assert_eq!(addresses, ["a1", "a2"]);
}
