mod account_tests;
