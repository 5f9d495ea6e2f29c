mod controller_coverage_tests;
mod exchange_coverage_tests;
mod invariants_tests;
