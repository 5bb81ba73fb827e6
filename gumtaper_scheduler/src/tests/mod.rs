mod series_proptests;
mod service_tests;
