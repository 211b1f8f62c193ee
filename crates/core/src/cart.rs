//! Product cart and the order message sent to the shop.

use crate::{
    errors::{BookingError, BookingResult},
    models::catalog::Product,
};

const ORDER_HEADER: &str = "Quisiera Pedir estos productos:";
const ORDER_RULE: &str = "━━━━━━━━━━━━━━━━━━━━";
const CURRENCY: &str = "Q";

#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    pub fn subtotal(&self) -> f64 {
        self.product.price * f64::from(self.quantity)
    }
}

/// Outcome of [`Cart::set_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    Updated(u32),
    Removed,
    /// The request exceeded stock; the line now holds the whole stock.
    ClampedToStock(u32),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Adds one unit, returning the new quantity for that product.
    ///
    /// # Errors
    ///
    /// `BookingError::Validation` when the product has no stock or the cart
    /// already holds all of it.
    pub fn add(&mut self, product: &Product) -> BookingResult<u32> {
        if product.stock == 0 {
            return Err(BookingError::Validation(format!(
                "{} is out of stock",
                product.name
            )));
        }

        match self.lines.iter_mut().find(|l| l.product.id == product.id) {
            Some(line) if line.quantity >= product.stock => Err(BookingError::Validation(
                format!("Only {} of {} in stock", product.stock, product.name),
            )),
            Some(line) => {
                line.quantity += 1;
                Ok(line.quantity)
            }
            None => {
                self.lines.push(CartLine {
                    product: product.clone(),
                    quantity: 1,
                });
                Ok(1)
            }
        }
    }

    pub fn remove(&mut self, product_id: i64) {
        self.lines.retain(|l| l.product.id != product_id);
    }

    /// Sets a line's quantity. Zero or less removes the line, more than the
    /// stock clamps to the stock. Returns `None` for products not in the cart.
    pub fn set_quantity(&mut self, product_id: i64, quantity: i64) -> Option<QuantityChange> {
        let line = self.lines.iter_mut().find(|l| l.product.id == product_id)?;

        if quantity <= 0 {
            self.remove(product_id);
            return Some(QuantityChange::Removed);
        }

        let stock = line.product.stock;
        if quantity > i64::from(stock) {
            line.quantity = stock;
            Some(QuantityChange::ClampedToStock(stock))
        } else {
            // quantity is within 1..=stock, so it fits in u32
            line.quantity = quantity as u32;
            Some(QuantityChange::Updated(line.quantity))
        }
    }

    pub fn total(&self) -> f64 {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Plain-text order listing every line with unit price and subtotal.
    pub fn order_message(&self) -> BookingResult<String> {
        if self.is_empty() {
            return Err(BookingError::Validation("The cart is empty".to_string()));
        }

        let mut message = format!("{ORDER_HEADER}\n\n");
        for (index, line) in self.lines.iter().enumerate() {
            message.push_str(&format!(
                "{}. {}\n   Cantidad: {}\n   Precio unitario: {CURRENCY}{:.2}\n   Subtotal: {CURRENCY}{:.2}\n\n",
                index + 1,
                line.product.name,
                line.quantity,
                line.product.price,
                line.subtotal(),
            ));
        }
        message.push_str(&format!(
            "{ORDER_RULE}\nTOTAL: {CURRENCY}{:.2}\n{ORDER_RULE}",
            self.total()
        ));

        Ok(message)
    }

    /// Link that opens a WhatsApp chat with `phone` prefilled with the order.
    pub fn whatsapp_url(&self, phone: &str) -> BookingResult<String> {
        let message = self.order_message()?;
        Ok(format!(
            "https://wa.me/{}?text={}",
            phone,
            urlencoding::encode(&message)
        ))
    }
}

/// Case-insensitive search over product names. A blank term matches all.
pub fn filter_products<'a>(products: &'a [Product], term: &str) -> Vec<&'a Product> {
    let term = term.trim().to_lowercase();
    products
        .iter()
        .filter(|p| term.is_empty() || p.name.to_lowercase().contains(&term))
        .collect()
}
