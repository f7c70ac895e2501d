pub mod decision_reader;
