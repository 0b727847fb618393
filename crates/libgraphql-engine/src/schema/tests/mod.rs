mod schema_builder_tests;
