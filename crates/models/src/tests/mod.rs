/// Entity round trips and schema constraints against PostgreSQL
pub mod crud_tests;
