//! Tests for `SqliteStore` against an in-memory database.

use clinic_core::{patient::Patient, store::ClinicStore};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn patient(phn: u64, name: &str) -> Patient {
  Patient::new(
    phn,
    name,
    "1990-05-17",
    "250 555 0199",
    "someone@example.com",
    "1 Fort St, Victoria",
  )
}

// ─── Patients ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_get_patient() {
  let s = store().await;
  let p = patient(9098765432, "Joe Hancock");

  s.insert_patient(&p).await.unwrap();

  let fetched = s.get_patient(p.phn).await.unwrap();
  assert_eq!(fetched, Some(p));
}

#[tokio::test]
async fn get_patient_missing_returns_none() {
  let s = store().await;
  assert!(s.get_patient(12345).await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_phn_is_rejected() {
  let s = store().await;
  s.insert_patient(&patient(1, "First")).await.unwrap();

  let err = s.insert_patient(&patient(1, "Second")).await.unwrap_err();
  assert!(matches!(err, Error::DuplicatePhn(1)));

  let all = s.list_patients().await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].name, "First");
}

#[tokio::test]
async fn list_keeps_insertion_order() {
  let s = store().await;
  for (phn, name) in [(30, "Carol"), (10, "Alice"), (20, "Bob")] {
    s.insert_patient(&patient(phn, name)).await.unwrap();
  }

  let phns: Vec<_> = s
    .list_patients()
    .await
    .unwrap()
    .into_iter()
    .map(|p| p.phn)
    .collect();
  assert_eq!(phns, [30, 10, 20]);
}

#[tokio::test]
async fn find_patients_is_case_insensitive() {
  let s = store().await;
  s.insert_patient(&patient(1, "Anna Smith")).await.unwrap();
  s.insert_patient(&patient(2, "Bob Jones")).await.unwrap();
  s.insert_patient(&patient(3, "JOHN SMITHERS")).await.unwrap();

  let found = s.find_patients("smith").await.unwrap();
  let phns: Vec<_> = found.iter().map(|p| p.phn).collect();
  assert_eq!(phns, [1, 3]);

  assert!(s.find_patients("zed").await.unwrap().is_empty());
}

#[tokio::test]
async fn update_patient_changes_fields() {
  let s = store().await;
  s.insert_patient(&patient(1, "Old Name")).await.unwrap();

  let mut changed = patient(1, "New Name");
  changed.phone = "604 555 0000".into();
  assert!(s.update_patient(1, &changed).await.unwrap());

  assert_eq!(s.get_patient(1).await.unwrap(), Some(changed));
}

#[tokio::test]
async fn update_patient_missing_returns_false() {
  let s = store().await;
  assert!(!s.update_patient(99, &patient(99, "Nobody")).await.unwrap());
}

#[tokio::test]
async fn update_patient_new_phn_carries_notes_and_order() {
  let s = store().await;
  s.insert_patient(&patient(1, "Moving")).await.unwrap();
  s.insert_patient(&patient(2, "Staying")).await.unwrap();
  s.insert_note(1, "before the move").await.unwrap();

  assert!(s.update_patient(1, &patient(5, "Moving")).await.unwrap());

  assert!(s.get_patient(1).await.unwrap().is_none());
  let notes = s.list_notes(5).await.unwrap();
  assert_eq!(notes.len(), 1);
  assert_eq!(notes[0].text, "before the move");
  assert!(s.list_notes(1).await.unwrap().is_empty());

  let phns: Vec<_> = s
    .list_patients()
    .await
    .unwrap()
    .into_iter()
    .map(|p| p.phn)
    .collect();
  assert_eq!(phns, [5, 2]);
}

#[tokio::test]
async fn delete_patient_removes_notes() {
  let s = store().await;
  s.insert_patient(&patient(1, "Gone")).await.unwrap();
  s.insert_note(1, "a note").await.unwrap();

  assert!(s.delete_patient(1).await.unwrap());
  assert!(s.get_patient(1).await.unwrap().is_none());

  // A new patient reusing the PHN starts with an empty ledger.
  s.insert_patient(&patient(1, "Newcomer")).await.unwrap();
  assert!(s.list_notes(1).await.unwrap().is_empty());
  let note = s.insert_note(1, "fresh").await.unwrap();
  assert_eq!(note.code, 1);
}

#[tokio::test]
async fn delete_patient_missing_returns_false() {
  let s = store().await;
  assert!(!s.delete_patient(7).await.unwrap());
}

#[tokio::test]
async fn oversized_phn_lookups_find_nothing() {
  let s = store().await;
  s.insert_patient(&patient(1, "A")).await.unwrap();

  assert!(s.get_patient(u64::MAX).await.unwrap().is_none());
  assert!(!s.update_patient(u64::MAX, &patient(2, "B")).await.unwrap());
  assert!(!s.delete_patient(u64::MAX).await.unwrap());
  assert!(s.list_notes(u64::MAX).await.unwrap().is_empty());
  assert!(s.get_note(u64::MAX, 1).await.unwrap().is_none());
  assert!(!s.update_note(u64::MAX, 1, "x").await.unwrap());
  assert!(!s.delete_note(u64::MAX, 1).await.unwrap());
  assert!(matches!(
    s.insert_note(u64::MAX, "x").await,
    Err(Error::PatientNotFound(u64::MAX))
  ));
  assert_eq!(s.list_patients().await.unwrap().len(), 1);
}

// ─── Notes ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn note_codes_are_per_patient() {
  let s = store().await;
  s.insert_patient(&patient(1, "A")).await.unwrap();
  s.insert_patient(&patient(2, "B")).await.unwrap();

  assert_eq!(s.insert_note(1, "a1").await.unwrap().code, 1);
  assert_eq!(s.insert_note(1, "a2").await.unwrap().code, 2);
  assert_eq!(s.insert_note(2, "b1").await.unwrap().code, 1);

  assert_eq!(s.list_notes(1).await.unwrap().len(), 2);
  assert_eq!(s.list_notes(2).await.unwrap().len(), 1);
}

#[tokio::test]
async fn note_codes_are_not_reused() {
  let s = store().await;
  s.insert_patient(&patient(1, "A")).await.unwrap();
  s.insert_note(1, "one").await.unwrap();
  let two = s.insert_note(1, "two").await.unwrap();

  assert!(s.delete_note(1, two.code).await.unwrap());
  let three = s.insert_note(1, "three").await.unwrap();
  assert_eq!(three.code, 3);
}

#[tokio::test]
async fn insert_note_for_missing_patient_errors() {
  let s = store().await;
  let err = s.insert_note(42, "orphan").await.unwrap_err();
  assert!(matches!(err, Error::PatientNotFound(42)));
}

#[tokio::test]
async fn get_note_roundtrips_timestamp() {
  let s = store().await;
  s.insert_patient(&patient(1, "A")).await.unwrap();
  let note = s.insert_note(1, "check blood pressure").await.unwrap();

  let fetched = s.get_note(1, note.code).await.unwrap().unwrap();
  assert_eq!(fetched, note);
  assert!(s.get_note(1, 99).await.unwrap().is_none());
  assert!(s.get_note(2, note.code).await.unwrap().is_none());
}

#[tokio::test]
async fn find_notes_filters_by_text() {
  let s = store().await;
  s.insert_patient(&patient(1, "A")).await.unwrap();
  s.insert_note(1, "Prescribed Amoxicillin").await.unwrap();
  s.insert_note(1, "follow-up in two weeks").await.unwrap();
  s.insert_note(1, "amoxicillin stopped").await.unwrap();

  let found = s.find_notes(1, "AMOXI").await.unwrap();
  let codes: Vec<_> = found.iter().map(|n| n.code).collect();
  assert_eq!(codes, [1, 3]);
}

#[tokio::test]
async fn update_note_keeps_code_and_timestamp() {
  let s = store().await;
  s.insert_patient(&patient(1, "A")).await.unwrap();
  let note = s.insert_note(1, "draft").await.unwrap();

  assert!(s.update_note(1, note.code, "final").await.unwrap());
  let fetched = s.get_note(1, note.code).await.unwrap().unwrap();
  assert_eq!(fetched.text, "final");
  assert_eq!(fetched.code, note.code);
  assert_eq!(fetched.timestamp, note.timestamp);

  assert!(!s.update_note(1, 99, "nothing").await.unwrap());
}

#[tokio::test]
async fn delete_note_missing_returns_false() {
  let s = store().await;
  s.insert_patient(&patient(1, "A")).await.unwrap();
  assert!(!s.delete_note(1, 1).await.unwrap());
}
