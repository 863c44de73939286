//! The interactive menu: translates user choices into catalog operations.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use stockroom_core::{Entity, ProductId};
use stockroom_inventory::Inventory;
use stockroom_products::{Product, ProductType, UnitPrice};

use crate::prompt::{CommandError, CommandResult, Console};

const MENU: &str = "\
Inventory Management System
1. Add Product
2. Sell Product
3. Restock Product
4. Remove Product
5. Search Products
6. View All Products
7. Save Inventory
8. Load Inventory
9. Remove Expired Groceries
10. Show Total Inventory Value
11. Exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Add,
    Sell,
    Restock,
    Remove,
    Search,
    ViewAll,
    Save,
    Load,
    RemoveExpired,
    TotalValue,
    Exit,
}

impl MenuChoice {
    fn parse(raw: &str) -> Option<Self> {
        Some(match raw {
            "1" => MenuChoice::Add,
            "2" => MenuChoice::Sell,
            "3" => MenuChoice::Restock,
            "4" => MenuChoice::Remove,
            "5" => MenuChoice::Search,
            "6" => MenuChoice::ViewAll,
            "7" => MenuChoice::Save,
            "8" => MenuChoice::Load,
            "9" => MenuChoice::RemoveExpired,
            "10" => MenuChoice::TotalValue,
            "11" => MenuChoice::Exit,
            _ => return None,
        })
    }
}

/// What the loop should do after an action.
enum Flow {
    Continue,
    Exit,
}

/// One interactive session over an owned catalog.
pub struct Session<R, W> {
    inventory: Inventory,
    console: Console<R, W>,
    default_file: PathBuf,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(inventory: Inventory, input: R, output: W, default_file: impl Into<PathBuf>) -> Self {
        Self {
            inventory,
            console: Console::new(input, output),
            default_file: default_file.into(),
        }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn into_parts(self) -> (Inventory, W) {
        let (_, output) = self.console.into_parts();
        (self.inventory, output)
    }

    /// Run until the user exits or input ends.
    ///
    /// Only terminal I/O failures end the session with an error; every
    /// operation failure is printed and the menu is shown again.
    pub fn run(&mut self) -> std::io::Result<()> {
        loop {
            match self.step() {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) | Err(CommandError::EndOfInput) => return Ok(()),
                Err(CommandError::Io(e)) => return Err(e),
                Err(CommandError::InvalidChoice) => {
                    self.report("Invalid choice. Please try again.")?;
                }
                Err(e) => {
                    tracing::debug!(error = %e, "menu action failed");
                    self.report(&format!("Error: {e}"))?;
                }
            }
        }
    }

    fn report(&mut self, line: &str) -> std::io::Result<()> {
        match self.console.say(line) {
            Ok(()) => Ok(()),
            Err(CommandError::Io(e)) => Err(e),
            Err(_) => Ok(()),
        }
    }

    fn step(&mut self) -> CommandResult<Flow> {
        self.console.say(format!("\n{MENU}"))?;
        let raw = self.console.ask("\nEnter your choice (1-11): ")?;
        let choice = MenuChoice::parse(&raw).ok_or(CommandError::InvalidChoice)?;

        match choice {
            MenuChoice::Add => self.add_product()?,
            MenuChoice::Sell => self.sell_product()?,
            MenuChoice::Restock => self.restock_product()?,
            MenuChoice::Remove => self.remove_product()?,
            MenuChoice::Search => self.search()?,
            MenuChoice::ViewAll => self.view_all()?,
            MenuChoice::Save => self.save()?,
            MenuChoice::Load => self.load()?,
            MenuChoice::RemoveExpired => {
                let count = self.inventory.remove_expired_groceries();
                self.console.say(format!("Removed {count} expired grocery items"))?;
            }
            MenuChoice::TotalValue => {
                let total = self.inventory.total_inventory_value();
                self.console.say(format!("Total inventory value: ${total:.2}"))?;
            }
            MenuChoice::Exit => {
                self.console.say("Exiting program...")?;
                return Ok(Flow::Exit);
            }
        }
        Ok(Flow::Continue)
    }

    fn ask_product_type(&mut self, label: &str) -> CommandResult<ProductType> {
        self.console.say("1. Electronics\n2. Grocery\n3. Clothing")?;
        let raw = self.console.ask(label)?;
        raw.parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| ProductType::ALL.get(i).copied())
            .ok_or(CommandError::InvalidChoice)
    }

    fn ask_product_id(&mut self, label: &str) -> CommandResult<ProductId> {
        Ok(self.console.ask(label)?.parse()?)
    }

    fn add_product(&mut self) -> CommandResult<()> {
        self.console.say("\nSelect Product Type:")?;
        let product_type = self.ask_product_type("Enter type (1-3): ")?;

        let raw_id = self.console.ask("Enter product ID (blank to generate): ")?;
        let id = if raw_id.is_empty() {
            ProductId::generate()
        } else {
            raw_id.parse()?
        };
        let name = self.console.ask("Enter product name: ")?;
        let price: UnitPrice = self.console.ask_parsed("Enter price: ")?;
        let quantity: u64 = self.console.ask_parsed("Enter initial quantity: ")?;

        let product = match product_type {
            ProductType::Electronics => {
                let warranty: u32 = self.console.ask_parsed("Enter warranty years: ")?;
                let brand = self.console.ask("Enter brand: ")?;
                Product::electronics(id, name, price, quantity, warranty, brand)?
            }
            ProductType::Grocery => {
                let raw = self.console.ask("Enter expiry date (YYYY-MM-DD): ")?;
                let expiry = NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                    .map_err(|_| CommandError::InvalidInput)?;
                Product::grocery(id, name, price, quantity, expiry)?
            }
            ProductType::Clothing => {
                let size = self.console.ask("Enter size: ")?;
                let material = self.console.ask("Enter material: ")?;
                Product::clothing(id, name, price, quantity, size, material)?
            }
        };

        let id = product.id().clone();
        self.inventory.add_product(product)?;
        self.console.say(format!("Product {id} added successfully!"))
    }

    fn sell_product(&mut self) -> CommandResult<()> {
        let id = self.ask_product_id("Enter product ID to sell: ")?;
        let quantity: i64 = self.console.ask_parsed("Enter quantity to sell: ")?;
        self.inventory.sell_product(&id, quantity)?;
        self.console.say("Sale completed successfully!")
    }

    fn restock_product(&mut self) -> CommandResult<()> {
        let id = self.ask_product_id("Enter product ID to restock: ")?;
        let quantity: i64 = self.console.ask_parsed("Enter quantity to add: ")?;
        self.inventory.restock_product(&id, quantity)?;
        self.console.say("Restock completed successfully!")
    }

    fn remove_product(&mut self) -> CommandResult<()> {
        let id = self.ask_product_id("Enter product ID to remove: ")?;
        if self.inventory.remove_product(&id) {
            self.console.say(format!("Product {id} removed"))
        } else {
            self.console.say(format!("Product {id} not found"))
        }
    }

    fn search(&mut self) -> CommandResult<()> {
        self.console.say("\nSearch Options:\n1. By Name\n2. By Type")?;
        let lines: Vec<String> = match self.console.ask("Enter search option (1-2): ")?.as_str() {
            "1" => {
                let needle = self.console.ask("Enter product name to search: ")?;
                describe_all(self.inventory.search_by_name(&needle))
            }
            "2" => {
                self.console.say("\nProduct Types:")?;
                let product_type = self.ask_product_type("Enter type to search (1-3): ")?;
                describe_all(self.inventory.search_by_type(product_type))
            }
            _ => return Err(CommandError::InvalidChoice),
        };

        if lines.is_empty() {
            return self.console.say("No products found");
        }
        self.console.say("\nSearch Results:")?;
        for line in lines {
            self.console.say(line)?;
        }
        Ok(())
    }

    fn view_all(&mut self) -> CommandResult<()> {
        let lines = describe_all(self.inventory.list_all());
        if lines.is_empty() {
            return self.console.say("Inventory is empty");
        }
        self.console.say("\nAll Products:")?;
        for line in lines {
            self.console.say(line)?;
        }
        Ok(())
    }

    fn ask_filename(&mut self, action: &str) -> CommandResult<PathBuf> {
        let label = format!("Enter filename to {action} [{}]: ", self.default_file.display());
        let raw = self.console.ask(&label)?;
        Ok(if raw.is_empty() {
            self.default_file.clone()
        } else {
            PathBuf::from(raw)
        })
    }

    fn save(&mut self) -> CommandResult<()> {
        let path = self.ask_filename("save")?;
        self.inventory.save_to_file(&path)?;
        self.console.say(format!("Inventory saved to {}", path.display()))
    }

    fn load(&mut self) -> CommandResult<()> {
        let path = self.ask_filename("load")?;
        let report = self.inventory.load_from_file(&path)?;
        self.console.say(loaded_message(&path, report.loaded))?;
        if report.skipped() > 0 {
            self.console.say(format!("Skipped {} records", report.skipped()))?;
            for malformed in &report.malformed {
                self.console.say(format!("  - {malformed}"))?;
            }
        }
        Ok(())
    }
}

fn describe_all(products: Vec<&Product>) -> Vec<String> {
    products.into_iter().map(ToString::to_string).collect()
}

fn loaded_message(path: &Path, loaded: usize) -> String {
    format!("Inventory loaded from {} ({loaded} products)", path.display())
}
