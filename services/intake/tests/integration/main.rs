mod intake_test;
mod otc_test;
mod visit_test;
