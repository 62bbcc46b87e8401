//! Interactive console driver
//!
//! `Console` runs the storefront menus over any `BufRead`/`Write` pair. It
//! only prompts, calls the library, and prints results: every rule lives in
//! the catalog, directory and cart.
//!
//! Invalid menu input is reported and the menu is shown again. A line that is
//! not valid UTF-8 is reported and the same prompt is asked again. End of
//! input at any prompt ends the whole session.

use crate::core::{
    AccountDirectory, CardReader, Cart, Catalog, SimulatedGateway, MIN_CHECKOUT_ITEMS,
};
use crate::types::{Product, ProductDetails, Role, SignupForm, StoreError, User};
use rust_decimal::Decimal;
use std::io::{BufRead, Write};
use std::time::Duration;
use tracing::{debug, warn};

/// Whether the session keeps going after a menu action
#[derive(Debug, Clone, Copy, PartialEq)]
enum Step {
    Continue,
    Quit,
}

/// Menu-driven storefront session
pub struct Console<R, W> {
    input: R,
    output: W,
    payment_delay: Duration,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, payment_delay: Duration) -> Self {
        Console {
            input,
            output,
            payment_delay,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run the main menu until the user exits or input ends
    ///
    /// # Errors
    ///
    /// Returns an error only if the console itself cannot be read or written.
    /// Failed store operations are reported to the user and the menu continues.
    pub fn run(
        &mut self,
        directory: &mut AccountDirectory,
        catalog: &Catalog,
    ) -> Result<(), StoreError> {
        writeln!(self.output, "Welcome to the E-commerce Application!")?;

        loop {
            writeln!(self.output, "\nPlease choose an option:")?;
            writeln!(self.output, "1. Sign Up")?;
            writeln!(self.output, "2. Log In")?;
            writeln!(self.output, "3. Exit")?;

            let Some(choice) = self.read_line("Enter your choice: ")? else {
                break;
            };
            let step = match choice.as_str() {
                "1" => self.sign_up(directory)?,
                "2" => self.log_in(directory, catalog)?,
                "3" => {
                    writeln!(self.output, "Exiting the application.")?;
                    Step::Quit
                }
                _ => {
                    writeln!(self.output, "Invalid choice. Please enter a number from 1 to 3.")?;
                    Step::Continue
                }
            };
            if step == Step::Quit {
                break;
            }
        }

        debug!("console session ended");
        Ok(())
    }

    /// Print the prompt and read one trimmed line, `None` at end of input
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, StoreError> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut buf = Vec::new();
        loop {
            buf.clear();
            if self.input.read_until(b'\n', &mut buf)? == 0 {
                return Ok(None);
            }
            match std::str::from_utf8(&buf) {
                Ok(line) => return Ok(Some(line.trim().to_string())),
                Err(e) => {
                    warn!(error = %e, "discarding console line that is not UTF-8");
                    writeln!(self.output, "Input is not valid text. Please try again.")?;
                    write!(self.output, "{}", prompt)?;
                    self.output.flush()?;
                }
            }
        }
    }

    /// Read answers for each prompt in order, `None` if input ends midway
    fn read_fields<const N: usize>(
        &mut self,
        prompts: [&str; N],
    ) -> Result<Option<[String; N]>, StoreError> {
        let mut answers: [String; N] = std::array::from_fn(|_| String::new());
        for (answer, prompt) in answers.iter_mut().zip(prompts) {
            match self.read_line(prompt)? {
                Some(line) => *answer = line,
                None => return Ok(None),
            }
        }
        Ok(Some(answers))
    }

    fn sign_up(&mut self, directory: &mut AccountDirectory) -> Result<Step, StoreError> {
        let Some(
            [user_id, first_name, last_name, email, password, phone_number, address, role],
        ) = self.read_fields([
            "Enter User ID: ",
            "Enter First Name: ",
            "Enter Last Name: ",
            "Enter Email: ",
            "Enter Password: ",
            "Enter Phone Number: ",
            "Enter Address: ",
            "Enter Role (buyer/seller): ",
        ])?
        else {
            return Ok(Step::Quit);
        };

        let form = SignupForm {
            user_id,
            first_name,
            last_name,
            email,
            password,
            phone_number,
            address,
            role,
        };
        match directory.signup(form) {
            Ok(user) => {
                let email = user.email.clone();
                writeln!(self.output, "Account created for {}. You can now log in.", email)?;
            }
            Err(e) => writeln!(self.output, "Signup failed: {}", e)?,
        }
        Ok(Step::Continue)
    }

    fn log_in(
        &mut self,
        directory: &AccountDirectory,
        catalog: &Catalog,
    ) -> Result<Step, StoreError> {
        let Some([email, password]) = self.read_fields(["Enter Email: ", "Enter Password: "])?
        else {
            return Ok(Step::Quit);
        };

        let user = match directory.login(&email, &password) {
            Ok(user) => user.clone(),
            Err(e) => {
                writeln!(self.output, "Login failed: {}", e)?;
                return Ok(Step::Continue);
            }
        };

        writeln!(self.output, "Welcome, {} {}!", user.first_name, user.last_name)?;
        match user.role {
            Role::Seller => self.seller_menu(catalog),
            Role::Buyer => self.buyer_menu(catalog, &user),
        }
    }

    fn seller_menu(&mut self, catalog: &Catalog) -> Result<Step, StoreError> {
        loop {
            writeln!(self.output, "\nSeller Menu:")?;
            writeln!(self.output, "1. Add Physical Product")?;
            writeln!(self.output, "2. Add Digital Product")?;
            writeln!(self.output, "3. Display Products")?;
            writeln!(self.output, "4. Delete Product")?;
            writeln!(self.output, "5. Logout")?;

            let Some(choice) = self.read_line("Enter your choice: ")? else {
                return Ok(Step::Quit);
            };
            let step = match choice.as_str() {
                "1" => self.add_physical_product(catalog)?,
                "2" => self.add_digital_product(catalog)?,
                "3" => self.display_products(catalog)?,
                "4" => self.delete_product(catalog)?,
                "5" => {
                    writeln!(self.output, "Logging out as Seller...")?;
                    return Ok(Step::Continue);
                }
                _ => {
                    writeln!(self.output, "Invalid choice.")?;
                    Step::Continue
                }
            };
            if step == Step::Quit {
                return Ok(Step::Quit);
            }
        }
    }

    fn add_physical_product(&mut self, catalog: &Catalog) -> Result<Step, StoreError> {
        let Some([id, name, price, weight, dimensions]) = self.read_fields([
            "Enter Product ID: ",
            "Enter Product Name: ",
            "Enter Product Price: ",
            "Enter Product Weight (kg): ",
            "Enter Product Dimensions: ",
        ])?
        else {
            return Ok(Step::Quit);
        };

        let product = parse_decimal("price", &price).and_then(|price| {
            let weight = parse_decimal("weight", &weight)?;
            Product::physical(id, name, price, weight, dimensions)
        });
        self.add_product(catalog, product)
    }

    fn add_digital_product(&mut self, catalog: &Catalog) -> Result<Step, StoreError> {
        let Some([id, name, price, file_size, format]) = self.read_fields([
            "Enter Product ID: ",
            "Enter Product Name: ",
            "Enter Product Price: ",
            "Enter File Size: ",
            "Enter Format: ",
        ])?
        else {
            return Ok(Step::Quit);
        };

        let product = parse_decimal("price", &price)
            .and_then(|price| Product::digital(id, name, price, file_size, format));
        self.add_product(catalog, product)
    }

    fn add_product(
        &mut self,
        catalog: &Catalog,
        product: Result<Product, StoreError>,
    ) -> Result<Step, StoreError> {
        let added = product.and_then(|product| {
            let label = format!("{} '{}'", product.kind_label(), product.name());
            catalog.add(product).map(|()| label)
        });
        match added {
            Ok(label) => writeln!(self.output, "{} added successfully!", label)?,
            Err(e) if is_input_error(&e) => writeln!(self.output, "Input Error: {}", e)?,
            Err(e) => writeln!(self.output, "Error: {}", e)?,
        }
        Ok(Step::Continue)
    }

    fn display_products(&mut self, catalog: &Catalog) -> Result<Step, StoreError> {
        let products = catalog.list_all();
        if products.is_empty() {
            writeln!(self.output, "No products available.")?;
            return Ok(Step::Continue);
        }

        writeln!(self.output, "\nList of Products:")?;
        for product in &products {
            writeln!(self.output, "{}\n", product)?;
        }
        Ok(Step::Continue)
    }

    fn delete_product(&mut self, catalog: &Catalog) -> Result<Step, StoreError> {
        let Some(product_id) = self.read_line("Enter Product ID to delete: ")? else {
            return Ok(Step::Quit);
        };

        match catalog.remove(&product_id) {
            Ok(()) => writeln!(self.output, "Product {} deleted.", product_id)?,
            Err(e) => writeln!(self.output, "{}", e)?,
        }
        Ok(Step::Continue)
    }

    fn buyer_menu(&mut self, catalog: &Catalog, buyer: &User) -> Result<Step, StoreError> {
        let mut cart = Cart::new();

        loop {
            writeln!(self.output, "\nBuyer Menu:")?;
            writeln!(self.output, "1. View Available Products")?;
            writeln!(self.output, "2. Add Product to Cart")?;
            writeln!(self.output, "3. View Cart")?;
            writeln!(self.output, "4. Remove Item from Cart")?;
            writeln!(self.output, "5. Checkout")?;
            writeln!(self.output, "6. Logout")?;

            let Some(choice) = self.read_line("Enter your choice: ")? else {
                return Ok(Step::Quit);
            };
            let step = match choice.as_str() {
                "1" => self.view_available_products(catalog)?,
                "2" => self.add_to_cart(catalog, &mut cart)?,
                "3" => self.view_cart(&cart)?,
                "4" => self.remove_from_cart(&mut cart)?,
                "5" => self.checkout(&mut cart)?,
                "6" => {
                    if !cart.is_empty() {
                        debug!(email = %buyer.email, items = cart.len(), "cart discarded at logout");
                    }
                    writeln!(self.output, "Logging out as Buyer...")?;
                    return Ok(Step::Continue);
                }
                _ => {
                    writeln!(self.output, "Invalid choice.")?;
                    Step::Continue
                }
            };
            if step == Step::Quit {
                return Ok(Step::Quit);
            }
        }
    }

    fn view_available_products(&mut self, catalog: &Catalog) -> Result<Step, StoreError> {
        let products = catalog.list_all();
        if products.is_empty() {
            writeln!(self.output, "No products available.")?;
            return Ok(Step::Continue);
        }

        writeln!(self.output, "\nAvailable Products:")?;
        for (i, product) in products.iter().enumerate() {
            let extra = match product.details() {
                ProductDetails::Physical { weight, .. } => format!("{} kg", weight),
                ProductDetails::Digital { format, .. } => format.clone(),
            };
            writeln!(
                self.output,
                "{}. [{}] {} - ${} ({})",
                i + 1,
                product.id(),
                product.name(),
                product.price(),
                extra
            )?;
        }
        Ok(Step::Continue)
    }

    fn add_to_cart(&mut self, catalog: &Catalog, cart: &mut Cart) -> Result<Step, StoreError> {
        let Some(product_id) = self.read_line("Enter Product ID to add to cart: ")? else {
            return Ok(Step::Quit);
        };

        match cart.add(catalog, &product_id) {
            Ok(product) => {
                let name = product.name().to_string();
                writeln!(self.output, "Added {} to your cart.", name)?;
            }
            Err(e) => writeln!(self.output, "{}", e)?,
        }
        Ok(Step::Continue)
    }

    fn view_cart(&mut self, cart: &Cart) -> Result<Step, StoreError> {
        let summary = cart.view();
        if summary.is_empty() {
            writeln!(self.output, "Your cart is empty.")?;
            return Ok(Step::Continue);
        }

        writeln!(self.output, "\nYour Cart:")?;
        for line in &summary.lines {
            writeln!(self.output, "{}. {} - ${}", line.position, line.name, line.price)?;
        }
        writeln!(self.output, "Total: ${}", summary.total)?;
        Ok(Step::Continue)
    }

    fn remove_from_cart(&mut self, cart: &mut Cart) -> Result<Step, StoreError> {
        let Some(answer) = self.read_line("Enter item number to remove: ")? else {
            return Ok(Step::Quit);
        };

        let removed = match answer.parse::<usize>() {
            Ok(position) if position >= 1 => cart.remove(position - 1).ok(),
            _ => None,
        };
        match removed {
            Some(product) => writeln!(self.output, "Removed {} from your cart.", product.name())?,
            None => writeln!(
                self.output,
                "Invalid item number. Please select a number from 1 to {}.",
                cart.len()
            )?,
        }
        Ok(Step::Continue)
    }

    fn checkout(&mut self, cart: &mut Cart) -> Result<Step, StoreError> {
        if cart.len() < MIN_CHECKOUT_ITEMS {
            writeln!(
                self.output,
                "You need at least {} items in your cart to checkout.",
                MIN_CHECKOUT_ITEMS
            )?;
            return Ok(Step::Continue);
        }

        writeln!(self.output, "Checking out {} items...", cart.len())?;
        let Some(method) =
            self.read_line("Enter your payment method (e.g., Credit Card, PayPal): ")?
        else {
            return Ok(Step::Quit);
        };
        let delay = self.payment_delay;
        let result = {
            let mut gateway = SimulatedGateway::new(&mut *self, delay);
            cart.checkout(&mut gateway, &method)
        };

        match result {
            Ok(receipt) => {
                writeln!(self.output, "Payment processed successfully!")?;
                writeln!(self.output, "Payment ID: {}", receipt.payment_id)?;
                writeln!(self.output, "Total price: ${}", receipt.total)?;
                writeln!(self.output, "Thank you for your purchase!")?;
            }
            Err(e) => {
                writeln!(self.output, "Payment Error: {}", e)?;
                writeln!(self.output, "Payment failed or was cancelled. Please try again.")?;
            }
        }
        Ok(Step::Continue)
    }
}

impl<R: BufRead, W: Write> CardReader for Console<R, W> {
    fn read_field(&mut self, prompt: &str) -> Option<String> {
        self.read_line(prompt).unwrap_or_else(|e| {
            warn!(error = %e, "failed to read card field");
            None
        })
    }

    fn notice(&mut self, message: &str) {
        if let Err(e) = writeln!(self.output, "{}", message) {
            warn!(error = %e, "failed to write payment notice");
        }
    }
}

/// Whether the error comes from what the seller typed
fn is_input_error(error: &StoreError) -> bool {
    error.is_validation() || matches!(error, StoreError::InvalidNumber { .. })
}

/// Parse a decimal typed at the console
fn parse_decimal(field: &'static str, value: &str) -> Result<Decimal, StoreError> {
    value
        .parse::<Decimal>()
        .map_err(|_| StoreError::invalid_number(field, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::FileStore;
    use rstest::rstest;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    fn run_script(script: &str) -> (TempDir, String) {
        let dir = tempdir().expect("Failed to create temp dir");
        let mut directory = AccountDirectory::open(FileStore::new(dir.path().join("users.txt")));
        let catalog = Catalog::new(FileStore::new(dir.path().join("products.txt")));

        let mut console = Console::new(script.as_bytes(), Vec::new(), Duration::ZERO);
        console.run(&mut directory, &catalog).unwrap();

        let output = String::from_utf8(console.into_output()).unwrap();
        (dir, output)
    }

    #[rstest]
    #[case::explicit_exit("3\n", "Exiting the application.")]
    #[case::end_of_input("", "Enter your choice: ")]
    #[case::invalid_then_exit("9\n3\n", "Invalid choice. Please enter a number from 1 to 3.")]
    #[case::word_choice("sign up\n", "Invalid choice.")]
    fn test_main_menu(#[case] script: &str, #[case] expected: &str) {
        let (_dir, output) = run_script(script);

        assert!(output.starts_with("Welcome to the E-commerce Application!"));
        assert!(output.contains(expected), "missing {:?} in {:?}", expected, output);
    }

    #[test]
    fn test_input_ending_mid_signup_quits() {
        let (dir, output) = run_script("1\n123\nJane\n");

        assert!(output.ends_with("Enter Last Name: "));
        assert!(!dir.path().join("users.txt").exists());
    }

    #[rstest]
    #[case::integer("24", Decimal::new(24, 0))]
    #[case::fraction("24.99", Decimal::new(2499, 2))]
    #[case::negative("-1.5", Decimal::new(-15, 1))]
    fn test_parse_decimal(#[case] input: &str, #[case] expected: Decimal) {
        assert_eq!(parse_decimal("price", input), Ok(expected));
    }

    #[rstest]
    #[case::empty("")]
    #[case::word("cheap")]
    #[case::comma_decimal("24,99")]
    fn test_parse_decimal_rejects(#[case] input: &str) {
        assert_eq!(
            parse_decimal("price", input),
            Err(StoreError::invalid_number("price", input))
        );
    }

    #[rstest]
    #[case::at_main_menu(b"\xff\xfe\n3\n".to_vec())]
    #[case::latin1_word(b"caf\xe9\n3\n".to_vec())]
    fn test_non_utf8_line_is_reported_and_prompt_repeats(#[case] script: Vec<u8>) {
        let dir = tempdir().expect("Failed to create temp dir");
        let mut directory = AccountDirectory::open(FileStore::new(dir.path().join("users.txt")));
        let catalog = Catalog::new(FileStore::new(dir.path().join("products.txt")));

        let mut console = Console::new(&script[..], Vec::new(), Duration::ZERO);
        console.run(&mut directory, &catalog).unwrap();

        let output = String::from_utf8(console.into_output()).unwrap();
        assert!(output.contains(
            "Enter your choice: Input is not valid text. Please try again.\nEnter your choice: "
        ));
        assert!(output.contains("Exiting the application."));
        // The bad line is not treated as a menu choice
        assert!(!output.contains("Invalid choice."));
    }

    fn seller_session(dir: &TempDir, script: &str) -> String {
        fs::write(
            dir.path().join("users.txt"),
            "321,Sam,Seller,sam@shop.com,S3ller!Pass,0987654321,1 Market St,seller\n",
        )
        .unwrap();
        let mut directory = AccountDirectory::open(FileStore::new(dir.path().join("users.txt")));
        let catalog = Catalog::new(FileStore::new(dir.path().join("products.txt")));

        let mut console = Console::new(script.as_bytes(), Vec::new(), Duration::ZERO);
        console.run(&mut directory, &catalog).unwrap();
        String::from_utf8(console.into_output()).unwrap()
    }

    #[rstest]
    #[case::zero_price("0", "Input Error: Product price must be greater than zero")]
    #[case::comma_price("12,50", "Input Error: Invalid number '12,50'")]
    #[case::huge_price("79228162514264337593543950335", "Input Error: Product price cannot exceed")]
    fn test_add_product_reports_input_errors(#[case] price: &str, #[case] expected: &str) {
        let dir = tempdir().expect("Failed to create temp dir");
        let script = format!("2\nsam@shop.com\nS3ller!Pass\n2\nD1\nBook\n{price}\n1MB\nPDF\n5\n3\n");

        let output = seller_session(&dir, &script);

        assert!(output.contains(expected), "missing {:?} in {:?}", expected, output);
        assert!(!dir.path().join("products.txt").exists());
    }

    #[test]
    fn test_add_product_write_failure_is_not_an_input_error() {
        let dir = tempdir().expect("Failed to create temp dir");
        fs::create_dir(dir.path().join("products.txt")).unwrap();
        let script = "2\nsam@shop.com\nS3ller!Pass\n2\nD1\nBook\n10\n1MB\nPDF\n5\n3\n";

        let output = seller_session(&dir, script);

        assert!(output.contains("Error: I/O error"));
        assert!(!output.contains("Input Error"));
        assert!(output.contains("Exiting the application."));
    }

    #[test]
    fn test_payment_notice_follows_card_prompts() {
        let dir = tempdir().expect("Failed to create temp dir");
        let catalog = Catalog::new(FileStore::new(dir.path().join("products.txt")));
        catalog
            .add(Product::digital("D1", "Rust Book", Decimal::new(1000, 2), "15MB", "PDF").unwrap())
            .unwrap();
        let mut cart = Cart::new();
        for _ in 0..MIN_CHECKOUT_ITEMS {
            cart.add(&catalog, "D1").unwrap();
        }

        let script = "Credit Card\n4111111111111111\n09/27\n123\n";
        let mut console = Console::new(script.as_bytes(), Vec::new(), Duration::ZERO);
        assert_eq!(console.checkout(&mut cart).unwrap(), Step::Continue);

        let output = String::from_utf8(console.into_output()).unwrap();
        assert!(output.contains(
            "Enter CVV (3 digits): Processing your payment of $30.00...\nPayment processed successfully!"
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_invalid_card_gets_no_payment_notice() {
        let dir = tempdir().expect("Failed to create temp dir");
        let catalog = Catalog::new(FileStore::new(dir.path().join("products.txt")));
        catalog
            .add(Product::digital("D1", "Rust Book", Decimal::new(1000, 2), "15MB", "PDF").unwrap())
            .unwrap();
        let mut cart = Cart::new();
        for _ in 0..MIN_CHECKOUT_ITEMS {
            cart.add(&catalog, "D1").unwrap();
        }

        let script = "Credit Card\n4111\n";
        let mut console = Console::new(script.as_bytes(), Vec::new(), Duration::ZERO);
        console.checkout(&mut cart).unwrap();

        let output = String::from_utf8(console.into_output()).unwrap();
        assert!(!output.contains("Processing your payment"));
        assert!(output.contains("Payment Error: Invalid card number"));
        assert_eq!(cart.len(), MIN_CHECKOUT_ITEMS);
    }
}
