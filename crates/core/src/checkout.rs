//! Checkout state machine.
//!
//! ```text
//!   Form ──submit──▶ Submitting ──complete──▶ Receipt
//!    ▲                   │                       │
//!    └──────fail─────────┘                       │
//!    └──────────────────reset────────────────────┘
//! ```
//!
//! Validation failures keep the flow in `Form` and never reach the server.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::Cart;
use crate::order::{CheckoutRequest, Receipt};
use crate::types::{CustomerDetails, CustomerError};

/// Errors raised while driving the checkout flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// Name or email failed validation.
    #[error("{0}")]
    Customer(#[from] CustomerError),

    /// There is nothing to order.
    #[error("your cart is empty")]
    EmptyCart,

    /// The requested transition is not allowed from the current state.
    #[error("cannot {action} during {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
}

/// Raw checkout form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Where the checkout currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutState {
    /// Collecting details. Carries the last error, if any.
    Form { error: Option<String> },
    /// Order sent, waiting for the server.
    Submitting { customer: CustomerDetails },
    /// Order placed.
    Receipt(Box<Receipt>),
}

impl CheckoutState {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Form { .. } => "form",
            Self::Submitting { .. } => "submitting",
            Self::Receipt(_) => "receipt",
        }
    }
}

/// Drives one checkout attempt through its states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutFlow {
    state: CheckoutState,
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutFlow {
    /// A flow sitting on an empty form.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: CheckoutState::Form { error: None },
        }
    }

    #[must_use]
    pub const fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// The error shown on the form, if the flow is on the form.
    #[must_use]
    pub fn form_error(&self) -> Option<&str> {
        match &self.state {
            CheckoutState::Form { error } => error.as_deref(),
            _ => None,
        }
    }

    /// Validate the form against the cart and move to `Submitting`.
    ///
    /// Returns the request body to send. On a validation failure the flow
    /// stays on the form with the error recorded.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidTransition`] outside the form state,
    /// [`CheckoutError::EmptyCart`] or [`CheckoutError::Customer`] when the
    /// input is rejected.
    pub fn submit(
        &mut self,
        cart: &Cart,
        form: &CheckoutForm,
    ) -> Result<CheckoutRequest, CheckoutError> {
        self.expect("submit", matches!(self.state, CheckoutState::Form { .. }))?;

        let validated = if cart.is_empty() {
            Err(CheckoutError::EmptyCart)
        } else {
            CustomerDetails::parse(&form.name, &form.email).map_err(CheckoutError::from)
        };

        match validated {
            Ok(customer) => {
                self.state = CheckoutState::Submitting { customer };
                Ok(CheckoutRequest {
                    cart_items: cart.checkout_lines(),
                })
            }
            Err(err) => {
                self.state = CheckoutState::Form {
                    error: Some(err.to_string()),
                };
                Err(err)
            }
        }
    }

    /// Record the server's confirmation and move to `Receipt`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidTransition`] unless submitting.
    pub fn complete(&mut self, receipt: Receipt) -> Result<&Receipt, CheckoutError> {
        let CheckoutState::Submitting { customer } = &self.state else {
            return Err(self.invalid("complete"));
        };

        let receipt = receipt.with_customer(customer.clone());
        self.state = CheckoutState::Receipt(Box::new(receipt));
        match &self.state {
            CheckoutState::Receipt(receipt) => Ok(&**receipt),
            _ => Err(self.invalid("complete")),
        }
    }

    /// Record a failed submission and return to the form.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidTransition`] unless submitting.
    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), CheckoutError> {
        self.expect(
            "fail",
            matches!(self.state, CheckoutState::Submitting { .. }),
        )?;
        self.state = CheckoutState::Form {
            error: Some(message.into()),
        };
        Ok(())
    }

    /// Leave the receipt (or abandon the form) and start over.
    pub fn reset(&mut self) {
        self.state = CheckoutState::Form { error: None };
    }

    /// Take the receipt out of a completed flow.
    #[must_use]
    pub fn into_receipt(self) -> Option<Receipt> {
        match self.state {
            CheckoutState::Receipt(receipt) => Some(*receipt),
            _ => None,
        }
    }

    fn expect(&self, action: &'static str, allowed: bool) -> Result<(), CheckoutError> {
        if allowed {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    const fn invalid(&self, action: &'static str) -> CheckoutError {
        CheckoutError::InvalidTransition {
            action,
            state: self.state.name(),
        }
    }
}
