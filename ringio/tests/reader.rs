// Aggregator for reader integration tests in `tests/reader/`.

#[path = "reader/transaction_test.rs"]
mod transaction_test;

#[path = "reader/card_id_test.rs"]
mod card_id_test;
