mod memory_cache_provider_tests;
