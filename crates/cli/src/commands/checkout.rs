//! Checkout command.

use rosebud_session::{CartSession, CheckoutMode, FileStore, SessionError, ShippingMethod};

/// Place an order for the shopping cart.
///
/// Carts holding custom/specialty lines route to the inquiry flow instead
/// of being charged; an empty cart is surfaced through the rejection notice
/// and does not fail the command.
pub fn place(
    session: &mut CartSession<FileStore>,
    shipping: ShippingMethod,
) -> Result<(), SessionError> {
    if session.checkout_mode() == CheckoutMode::Inquiry {
        tracing::info!(
            "Cart contains custom items - submit it as an inquiry: rosebud show, then contact sales"
        );
        return Ok(());
    }

    match session.place_order(shipping) {
        Ok(draft) => {
            tracing::info!("Order {} placed", draft.code);
            tracing::info!("  Placed at: {}", draft.placed_at.format("%B %e, %Y"));
            tracing::info!("  Items: {}", draft.items.len());
            tracing::info!("  Subtotal: {}", rosebud_core::display_price(draft.summary.subtotal));
            tracing::info!("  Discount: {}", rosebud_core::display_price(draft.summary.discount));
            tracing::info!("  Shipping: {}", rosebud_core::display_price(draft.summary.shipping));
            tracing::info!("  Total: {}", rosebud_core::display_price(draft.summary.total));
            Ok(())
        }
        Err(SessionError::EmptyCart) => Ok(()),
        Err(other) => Err(other),
    }
}
