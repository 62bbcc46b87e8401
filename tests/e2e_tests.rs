//! End-to-end integration tests
//!
//! These tests drive complete console sessions using predefined fixtures.
//! Each test:
//! 1. Copies the seed `products.txt` / `users.txt` of a fixture (if any) into
//!    a temporary directory
//! 2. Feeds `input.txt` to the console, one answer per line
//! 3. Checks that every line of `expected_output.txt` appears in the console
//!    output, in order
//! 4. Compares the resulting store files with `expected_products.txt` /
//!    `expected_users.txt` when the fixture provides them
//!
//! Test fixtures are located in tests/fixtures/ and cover:
//! - Signup validation and login
//! - Seller product management (add, display, delete)
//! - Buyer cart and checkout flows
//! - Files containing malformed lines

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_storefront::cli;
    use rust_storefront::StoreConfig;
    use std::fs;
    use std::path::Path;
    use std::time::Duration;
    use tempfile::tempdir;

    const STORE_FILES: [&str; 2] = ["products.txt", "users.txt"];

    /// Run one console session with the given input over the given directory
    fn run_session(dir: &Path, input: &str) -> String {
        let config = StoreConfig {
            products_file: dir.join("products.txt"),
            users_file: dir.join("users.txt"),
            payment_delay: Duration::ZERO,
        };

        let mut output = Vec::new();
        cli::run(&config, input.as_bytes(), &mut output)
            .unwrap_or_else(|e| panic!("Console session failed: {}", e));

        String::from_utf8(output).expect("Console output is not UTF-8")
    }

    /// Assert that each non-empty expected line occurs in the output after the previous one
    fn assert_output_in_order(output: &str, expected: &str) {
        let mut rest = output;
        for line in expected.lines().filter(|l| !l.trim().is_empty()) {
            match rest.find(line) {
                Some(at) => rest = &rest[at + line.len()..],
                None => panic!(
                    "Expected {:?} (in order) in console output:\n{}",
                    line, output
                ),
            }
        }
    }

    /// Run a fixture and compare the console output and resulting store files
    ///
    /// # Arguments
    ///
    /// * `fixture_name` - Name of the fixture directory (e.g., "buyer_checkout")
    ///
    /// # Panics
    ///
    /// Panics if:
    /// - The fixture input cannot be read
    /// - An expected output line is missing
    /// - A store file doesn't match its expected content
    fn run_test_fixture(fixture_name: &str) {
        let fixture_dir = Path::new("tests/fixtures").join(fixture_name);
        let input_path = fixture_dir.join("input.txt");
        assert!(
            input_path.exists(),
            "Input file not found: {}",
            input_path.display()
        );

        // Seed the working directory
        let work = tempdir().expect("Failed to create temp dir");
        for name in STORE_FILES {
            let seed = fixture_dir.join(name);
            if seed.exists() {
                fs::copy(&seed, work.path().join(name)).expect("Failed to copy seed file");
            }
        }

        let input = fs::read_to_string(&input_path).expect("Failed to read input file");
        let output = run_session(work.path(), &input);

        let expected_output = fs::read_to_string(fixture_dir.join("expected_output.txt"))
            .expect("Failed to read expected output");
        assert_output_in_order(&output, &expected_output);

        for name in STORE_FILES {
            let expected_path = fixture_dir.join(format!("expected_{}", name));
            if !expected_path.exists() {
                continue;
            }
            let expected = fs::read_to_string(&expected_path).expect("Failed to read expected file");
            let actual = fs::read_to_string(work.path().join(name))
                .unwrap_or_else(|e| panic!("Failed to read {}: {}", name, e));
            assert_eq!(
                actual, expected,
                "\n\nFixture '{}': {} mismatch!\n\nExpected:\n{}\n\nActual:\n{}\n",
                fixture_name, name, expected, actual
            );
        }
    }

    #[rstest]
    #[case::signup_and_login("signup_and_login")]
    #[case::seller_adds_products("seller_adds_products")]
    #[case::seller_deletes_product("seller_deletes_product")]
    #[case::buyer_checkout("buyer_checkout")]
    #[case::checkout_rejected("checkout_rejected")]
    #[case::malformed_lines("malformed_lines")]
    fn test_fixture(#[case] fixture: &str) {
        run_test_fixture(fixture);
    }

    #[test]
    fn test_accounts_and_products_survive_restart() {
        let work = tempdir().expect("Failed to create temp dir");

        let signup = "1\n321\nSam\nSeller\nsam@shop.com\nS3ller!Pass\n0987654321\n1 Market St\nseller\n\
                      2\nsam@shop.com\nS3ller!Pass\n2\nD1\nRust Book\n10.00\n15MB\nPDF\n5\n3\n";
        run_session(work.path(), signup);

        let output = run_session(work.path(), "2\nsam@shop.com\nS3ller!Pass\n3\n5\n3\n");

        assert_output_in_order(
            &output,
            "Welcome, Sam Seller!\nDigital Product - Rust Book\n  File Size: 15MB\n",
        );
    }

    #[test]
    fn test_seller_products_visible_to_buyer_in_same_session() {
        let work = tempdir().expect("Failed to create temp dir");
        fs::write(
            work.path().join("users.txt"),
            "321,Sam,Seller,sam@shop.com,S3ller!Pass,0987654321,1 Market St,seller\n\
             456,Bea,Buyer,bea@shop.com,Buy3r!Pass,0123456789,2 High St,buyer\n",
        )
        .unwrap();

        let script = "2\nsam@shop.com\nS3ller!Pass\n1\nP7\nKettle\n30\n1.2\n20x15x25\n5\n\
                      2\nbea@shop.com\nBuy3r!Pass\n2\nP7\n3\n6\n3\n";
        let output = run_session(work.path(), script);

        assert_output_in_order(
            &output,
            "Added Kettle to your cart.\n1. Kettle - $30\nTotal: $30\n",
        );
    }

    #[rstest]
    #[case::at_main_menu("")]
    #[case::at_login("2\nbea@shop.com\n")]
    #[case::at_buyer_menu("2\nbea@shop.com\nBuy3r!Pass\n")]
    #[case::during_payment(
        "2\nbea@shop.com\nBuy3r!Pass\n2\nP1\n2\nD1\n2\nP2\n5\nCredit Card\n4111111111111111\n"
    )]
    fn test_end_of_input_ends_session(#[case] script: &str) {
        let work = tempdir().expect("Failed to create temp dir");
        fs::copy(
            "tests/fixtures/buyer_checkout/users.txt",
            work.path().join("users.txt"),
        )
        .unwrap();
        fs::copy(
            "tests/fixtures/buyer_checkout/products.txt",
            work.path().join("products.txt"),
        )
        .unwrap();

        let output = run_session(work.path(), script);

        assert!(!output.contains("Exiting the application."));
        assert!(!output.contains("Payment processed successfully!"));
    }
}
