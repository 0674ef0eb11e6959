mod terrain_tests;
