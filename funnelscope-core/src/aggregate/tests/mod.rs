mod histogram_tests;
