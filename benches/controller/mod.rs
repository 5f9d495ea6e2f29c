mod cycle;

pub use cycle::register_benchmarks;
