mod appointments_test;
mod availability_test;
mod health_test;
mod middleware_test;
mod test_utils;
