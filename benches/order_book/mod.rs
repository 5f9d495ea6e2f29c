pub mod cancel;

// Import common benchmarks into the main bench group
pub fn register_benchmarks(c: &mut criterion::Criterion) {
    submit::register_benchmarks(c);
    cancel::register_benchmarks(c);
}
