// Dispute tests - raising disputes and admin adjudication

use escrowmarket::identity::AccountId;
use escrowmarket::ledger::{ErrorKind, Ledger, LedgerError, LedgerEvent};
use escrowmarket::market::{ItemStatus, OrderId, OrderStatus};

struct Scenario {
    ledger: Ledger,
    admin: AccountId,
    seller: AccountId,
    buyer: AccountId,
    order_id: OrderId,
}

fn shipped_widget() -> Scenario {
    let admin = AccountId::from_label("admin");
    let seller = AccountId::from_label("seller");
    let buyer = AccountId::from_label("buyer");
    let mut ledger = Ledger::new(admin.clone());

    let item_id = ledger.list_item("Widget", "A widget", 1000, &seller).unwrap();
    let order_id = ledger.purchase_item(item_id, 1000, &buyer).unwrap();
    ledger.mark_as_shipped(order_id, &seller).unwrap();

    Scenario { ledger, admin, seller, buyer, order_id }
}

// ============================================================================
// RAISING DISPUTES
// ============================================================================

#[test]
fn test_buyer_can_dispute_shipped_order() {
    let Scenario { mut ledger, buyer, order_id, .. } = shipped_widget();

    ledger.raise_dispute(order_id, &buyer).unwrap();

    assert_eq!(ledger.get_order(order_id).unwrap().status(), OrderStatus::Disputed);
    assert_eq!(
        ledger.events().last(),
        Some(&LedgerEvent::DisputeRaised {
            order_id,
            raised_by: buyer.clone()
        })
    );
}

#[test]
fn test_seller_can_dispute_shipped_order() {
    let Scenario { mut ledger, seller, order_id, .. } = shipped_widget();

    ledger.raise_dispute(order_id, &seller).unwrap();
    assert_eq!(ledger.get_order(order_id).unwrap().status(), OrderStatus::Disputed);
}

#[test]
fn test_stranger_cannot_dispute() {
    let Scenario { mut ledger, order_id, .. } = shipped_widget();
    let stranger = AccountId::from_label("stranger");

    let err = ledger.raise_dispute(order_id, &stranger).unwrap_err();
    assert!(matches!(err, LedgerError::UnauthorizedDispute));
    assert_eq!(err.kind(), ErrorKind::Authorization);
    assert_eq!(ledger.get_order(order_id).unwrap().status(), OrderStatus::Shipped);
}

#[test]
fn test_cannot_dispute_pending_order() {
    let admin = AccountId::from_label("admin");
    let seller = AccountId::from_label("seller");
    let buyer = AccountId::from_label("buyer");
    let mut ledger = Ledger::new(admin);

    let item_id = ledger.list_item("Widget", "A widget", 1000, &seller).unwrap();
    let order_id = ledger.purchase_item(item_id, 1000, &buyer).unwrap();

    let err = ledger.raise_dispute(order_id, &buyer).unwrap_err();
    assert!(matches!(err, LedgerError::ItemNotShipped));
}

#[test]
fn test_disputing_holds_escrow() {
    let Scenario { mut ledger, buyer, order_id, .. } = shipped_widget();

    ledger.raise_dispute(order_id, &buyer).unwrap();
    assert_eq!(ledger.custodied_balance(), 1000);
    assert_eq!(ledger.open_order_total(), 1000);
}

// ============================================================================
// RESOLUTION
// ============================================================================

#[test]
fn test_resolve_in_buyers_favor_refunds_and_relists() {
    let Scenario { mut ledger, admin, seller, buyer, order_id } = shipped_widget();

    ledger.raise_dispute(order_id, &buyer).unwrap();
    ledger.resolve_dispute(order_id, true, &admin).unwrap();

    let order = ledger.get_order(order_id).unwrap();
    assert_eq!(order.status(), OrderStatus::Cancelled);
    assert_eq!(
        ledger.get_item(order.item_id()).unwrap().status(),
        ItemStatus::Available
    );
    assert_eq!(ledger.balance_of(&buyer), 1000);
    assert_eq!(ledger.balance_of(&seller), 0);
    assert_eq!(ledger.custodied_balance(), 0);
}

#[test]
fn test_resolve_in_sellers_favor_pays_out() {
    let Scenario { mut ledger, admin, seller, buyer, order_id } = shipped_widget();

    ledger.raise_dispute(order_id, &seller).unwrap();
    ledger.resolve_dispute(order_id, false, &admin).unwrap();

    let order = ledger.get_order(order_id).unwrap();
    assert_eq!(order.status(), OrderStatus::Delivered);
    // Item stays sold in the seller's favor
    assert_eq!(
        ledger.get_item(order.item_id()).unwrap().status(),
        ItemStatus::Sold
    );
    assert_eq!(ledger.balance_of(&seller), 1000);
    assert_eq!(ledger.balance_of(&buyer), 0);
    assert_eq!(ledger.custodied_balance(), 0);
}

#[test]
fn test_resolution_emits_dispute_resolved() {
    let Scenario { mut ledger, admin, buyer, order_id, .. } = shipped_widget();

    ledger.raise_dispute(order_id, &buyer).unwrap();
    ledger.resolve_dispute(order_id, true, &admin).unwrap();

    assert_eq!(
        ledger.events().last(),
        Some(&LedgerEvent::DisputeResolved {
            order_id,
            favor_buyer: true,
            resolved_by: admin.clone(),
            amount: 1000,
        })
    );
}

#[test]
fn test_only_admins_can_resolve() {
    let Scenario { mut ledger, buyer, order_id, .. } = shipped_widget();

    ledger.raise_dispute(order_id, &buyer).unwrap();

    let err = ledger.resolve_dispute(order_id, true, &buyer).unwrap_err();
    assert!(matches!(err, LedgerError::NotAdmin));
    assert_eq!(ledger.get_order(order_id).unwrap().status(), OrderStatus::Disputed);
}

#[test]
fn test_cannot_resolve_undisputed_order() {
    let Scenario { mut ledger, admin, order_id, .. } = shipped_widget();

    let err = ledger.resolve_dispute(order_id, true, &admin).unwrap_err();
    assert!(matches!(err, LedgerError::OrderNotInDispute));
}

#[test]
fn test_resolution_is_terminal() {
    let Scenario { mut ledger, admin, seller, buyer, order_id } = shipped_widget();

    ledger.raise_dispute(order_id, &buyer).unwrap();
    ledger.resolve_dispute(order_id, false, &admin).unwrap();

    // A second resolution is rejected and no double payout happens
    let err = ledger.resolve_dispute(order_id, true, &admin).unwrap_err();
    assert!(matches!(err, LedgerError::OrderNotInDispute));
    assert_eq!(ledger.balance_of(&seller), 1000);
    assert_eq!(ledger.balance_of(&buyer), 0);
}
