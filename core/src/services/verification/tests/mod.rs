mod hasher_tests;
