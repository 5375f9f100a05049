pub mod call_review;
