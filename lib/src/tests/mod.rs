mod feature_tests;
