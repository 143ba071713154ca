//! Integration tests for cadence-core
//!
//! These tests exercise the full load → detect → query workflow.

use cadence_core::{
    detect_recurring_patterns, import::parse_csv, matches_recurring_pattern,
    recurring_pattern_for_transaction, Frequency, Transaction,
};
use chrono::NaiveDate;

/// Test CSV data with three obvious subscriptions (Netflix, Spotify, Hulu):
/// - Consistent amounts (within the 10% similarity tolerance)
/// - Regular monthly intervals (~30 days)
/// - 4 transactions each (minimum 3 required for detection)
/// plus a one-off retail purchase that must not form a pattern.
fn csv_with_subscriptions() -> &'static str {
    "id,date,merchant,amount\n\
     n1,2023-07-15,NETFLIX.COM,-15.49\n\
     n2,2023-08-15,NETFLIX.COM,-15.49\n\
     n3,2023-09-15,NETFLIX.COM,-15.49\n\
     n4,2023-10-15,NETFLIX.COM,-15.49\n\
     s1,2023-07-20,Spotify USA,-10.99\n\
     s2,2023-08-20,Spotify USA,-10.99\n\
     s3,2023-09-20,Spotify USA,-10.99\n\
     s4,2023-10-20,Spotify USA,-10.99\n\
     h1,2023-07-01,HULU,-17.99\n\
     h2,2023-08-01,HULU,-17.99\n\
     h3,2023-09-01,HULU,-17.99\n\
     h4,2023-10-01,HULU,-17.99\n\
     r1,2023-09-03,Best Buy,-499.00\n"
}

#[test]
fn test_full_detection_workflow() {
    let transactions = parse_csv(csv_with_subscriptions().as_bytes()).expect("Failed to parse CSV");
    assert_eq!(transactions.len(), 13);

    let patterns = detect_recurring_patterns(&transactions, 3);

    // Netflix, Spotify, and Hulu; Best Buy has a single transaction
    assert_eq!(patterns.len(), 3);
    for p in &patterns {
        assert_eq!(p.frequency, Frequency::Monthly);
        assert!(p.confidence >= 90, "{} scored {}", p.merchant, p.confidence);
        assert_eq!(p.transaction_ids.len(), 4);
        assert!(p.day_of_month.is_some());
        assert!(p.day_of_week.is_none());
    }

    // Next expected charge projects one calendar month past the latest
    let netflix = patterns
        .iter()
        .find(|p| p.merchant == "NETFLIX.COM")
        .unwrap();
    assert_eq!(
        netflix.next_expected_date,
        NaiveDate::from_ymd_opt(2023, 11, 15).unwrap()
    );
}

#[test]
fn test_pattern_queries_after_detection() {
    let transactions = parse_csv(csv_with_subscriptions().as_bytes()).unwrap();
    let patterns = detect_recurring_patterns(&transactions, 3);

    // Member lookup by id
    let member = transactions.iter().find(|t| t.id == "s2").unwrap();
    let found = recurring_pattern_for_transaction(member, &patterns).unwrap();
    assert_eq!(found.merchant, "Spotify USA");

    // A November charge not in the detection run still matches the pattern
    let next_charge = Transaction {
        id: "n5".to_string(),
        date: NaiveDate::from_ymd_opt(2023, 11, 15).unwrap(),
        merchant: "netflix.com".to_string(),
        amount: -15.49,
    };
    let netflix = patterns
        .iter()
        .find(|p| p.merchant == "NETFLIX.COM")
        .unwrap();
    assert!(matches_recurring_pattern(&next_charge, netflix));
    assert!(recurring_pattern_for_transaction(&next_charge, &patterns).is_none());
}

#[test]
fn test_raising_min_occurrences_prunes_patterns() {
    let transactions = parse_csv(csv_with_subscriptions().as_bytes()).unwrap();

    assert_eq!(detect_recurring_patterns(&transactions, 3).len(), 3);
    assert_eq!(detect_recurring_patterns(&transactions, 4).len(), 3);
    assert!(detect_recurring_patterns(&transactions, 5).is_empty());
}
