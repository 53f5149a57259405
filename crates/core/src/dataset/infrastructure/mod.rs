pub mod feret_ground_truth_scanner;
