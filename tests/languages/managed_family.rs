//! Managed language family integration tests
//!
//! Tests for Java and C#.

use crate::common::{find_symbol, TestRepo};

mod java_tests {
    use super::*;

    #[test]
    fn test_class_with_constructor_and_methods() {
        let repo = TestRepo::new();
        repo.add_file(
            "src/main/java/shop/Cart.java",
            r#"package shop;

/** Shopping cart. */
public class Cart {
    private int items;

    public Cart() {
        items = 0;
    }

    // Adds one item.
    public void add() {
        items++;
    }
}
"#,
        );

        let snapshot = repo.scan();
        let record = &snapshot.files["src/main/java/shop/Cart.java"];
        assert_eq!(record.symbols.len(), 1);

        let cart = &record.symbols[0];
        assert_eq!(cart.signature, "public class Cart");
        assert_eq!(cart.documentation, "Shopping cart.");
        assert_eq!(cart.members.len(), 2);
        assert_eq!(cart.members[0].signature, "public Cart()");
        assert_eq!(cart.members[1].documentation, "Adds one item.");
    }
}

mod csharp_tests {
    use super::*;

    #[test]
    fn test_namespace_contains_types() {
        let repo = TestRepo::new();
        repo.add_file(
            "Services/Billing.cs",
            r#"namespace Shop.Billing
{
    /// <summary>Creates invoices.</summary>
    public class InvoiceService
    {
        public Invoice Create(Order order)
        {
            return new Invoice(order);
        }
    }
}
"#,
        );

        let snapshot = repo.scan();
        let record = &snapshot.files["Services/Billing.cs"];
        assert_eq!(record.symbols.len(), 1);
        assert_eq!(record.symbols[0].signature, "namespace Shop.Billing");

        let service = find_symbol(&record.symbols, "InvoiceService").unwrap();
        assert_eq!(service.documentation, "Creates invoices.");
        assert_eq!(
            service.members[0].signature,
            "public Invoice Create(Order order)"
        );
    }
}
