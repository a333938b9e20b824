// ABOUTME: Unit tests for the users database module
// ABOUTME: Tests record CRUD, the trimmed listing, and the report/frequency sub-field updates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Spark Health

// Test files: allow missing_docs (rustc lint) and unwrap (valid in tests)
#![allow(missing_docs, clippy::unwrap_used)]

use spark_intake::database::{Database, NewUser, UserUpdate};

async fn create_test_db() -> Database {
    Database::new("sqlite::memory:").await.unwrap()
}

fn sample_user(name: &str) -> NewUser {
    NewUser {
        user_name: name.to_owned(),
        age: "36".to_owned(),
        sex: "Female".to_owned(),
        height: "5'6\"".to_owned(),
        weight: "140lbs".to_owned(),
        medical_background: "None notable".to_owned(),
        chronic_conditions: "asthma".to_owned(),
        current_medications: "albuterol".to_owned(),
        hereditary_risk_patterns: "heart disease".to_owned(),
        wellness_check_frequency: String::new(),
        wellness_report: String::new(),
    }
}

#[tokio::test]
async fn create_and_get_round_trips_every_field() {
    let db = create_test_db().await;
    let new_user = sample_user("Ada");

    let id = db.create_user(&new_user).await.unwrap();
    let record = db.get_user(id).await.unwrap().unwrap();

    assert_eq!(record.user_id, id);
    assert_eq!(record.user_name, "Ada");
    assert_eq!(record.age, "36");
    assert_eq!(record.sex, "Female");
    assert_eq!(record.height, "5'6\"");
    assert_eq!(record.weight, "140lbs");
    assert_eq!(record.medical_background, "None notable");
    assert_eq!(record.chronic_conditions, "asthma");
    assert_eq!(record.current_medications, "albuterol");
    assert_eq!(record.hereditary_risk_patterns, "heart disease");
    assert_eq!(record.wellness_check_frequency, "");
    assert_eq!(record.wellness_report, "");
}

#[tokio::test]
async fn get_unknown_user_returns_none() {
    let db = create_test_db().await;
    assert!(db.get_user(999).await.unwrap().is_none());
}

#[tokio::test]
async fn list_returns_trimmed_records_newest_first() {
    let db = create_test_db().await;
    let first = db.create_user(&sample_user("First")).await.unwrap();
    let second = db.create_user(&sample_user("Second")).await.unwrap();

    let users = db.list_users().await.unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].user_id, second);
    assert_eq!(users[0].user_name, "Second");
    assert_eq!(users[1].user_id, first);
    assert_eq!(users[0].age, "36");
    assert_eq!(users[0].sex, "Female");
}

#[tokio::test]
async fn update_overwrites_profile_fields_but_not_derived_fields() {
    let db = create_test_db().await;
    let id = db.create_user(&sample_user("Ada")).await.unwrap();
    db.update_wellness_report(id, "Existing report").await.unwrap();
    db.update_wellness_frequency(id, "7").await.unwrap();

    let update = UserUpdate {
        user_name: "Ada Lovelace".to_owned(),
        age: "37".to_owned(),
        sex: "Female".to_owned(),
        height: "5'7\"".to_owned(),
        weight: "138lbs".to_owned(),
        medical_background: String::new(),
        chronic_conditions: String::new(),
        current_medications: String::new(),
        hereditary_risk_patterns: String::new(),
    };
    assert!(db.update_user(id, &update).await.unwrap());

    let record = db.get_user(id).await.unwrap().unwrap();
    assert_eq!(record.user_name, "Ada Lovelace");
    assert_eq!(record.age, "37");
    assert_eq!(record.chronic_conditions, "");
    // The derived fields survive the full-field update untouched
    assert_eq!(record.wellness_report, "Existing report");
    assert_eq!(record.wellness_check_frequency, "7");
}

#[tokio::test]
async fn updates_against_unknown_ids_report_no_match() {
    let db = create_test_db().await;
    assert!(!db.update_user(5, &UserUpdate::default()).await.unwrap());
    assert!(!db.update_wellness_report(5, "report").await.unwrap());
    assert!(!db.update_wellness_frequency(5, "30").await.unwrap());
}

#[tokio::test]
async fn report_and_frequency_updates_are_independent() {
    let db = create_test_db().await;
    let id = db.create_user(&sample_user("Ada")).await.unwrap();

    assert!(db.update_wellness_report(id, "Feeling fine.").await.unwrap());
    let record = db.get_user(id).await.unwrap().unwrap();
    assert_eq!(record.wellness_report, "Feeling fine.");
    assert_eq!(record.wellness_check_frequency, "");

    assert!(db.update_wellness_frequency(id, "14").await.unwrap());
    let record = db.get_user(id).await.unwrap().unwrap();
    assert_eq!(record.wellness_check_frequency, "14");
    assert_eq!(record.wellness_report, "Feeling fine.");
}
