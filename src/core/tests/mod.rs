mod load_once_tests;
