//! Source fixtures shared by integration tests.

/// A small shop application spread over several files.
pub const SHOP: &[(&str, &str)] = &[
    (
        "Shop/Order.cs",
        r#"
using System;
using System.Collections.Generic;
using Shop.Billing;

namespace Shop
{
    public class Order : Entity
    {
        private readonly List<OrderLine> _lines = new List<OrderLine>();

        public Customer Customer { get; set; }
        public Invoice Invoice { get; private set; }
        public DateTime CreatedAt { get; } = DateTime.UtcNow;

        public void Add(Product product, int quantity)
        {
            var line = new OrderLine(product, quantity);
            _lines.Add(line);
        }

        public IReadOnlyList<OrderLine> Lines => _lines;
    }
}
"#,
    ),
    (
        "Shop/OrderLine.cs",
        r#"
namespace Shop
{
    public sealed class OrderLine
    {
        public OrderLine(Product product, int quantity)
        {
            Product = product;
            Quantity = quantity;
        }

        public Product Product { get; }
        public int Quantity { get; }
        public decimal Total => Product.Price * Quantity;
    }
}
"#,
    ),
    (
        "Shop/Product.cs",
        r#"
namespace Shop;

public record Product(string Name, decimal Price);
"#,
    ),
    (
        "Shop/Customer.cs",
        r#"
namespace Shop
{
    public class Customer : Entity
    {
        public string Name { get; set; }
        public Address Address { get; set; }
    }

    public struct Address
    {
        public string Street;
        public string City;
    }
}
"#,
    ),
    (
        "Shop/Entity.cs",
        r#"
using System;

namespace Shop
{
    public abstract class Entity
    {
        public Guid Id { get; } = Guid.NewGuid();
    }
}
"#,
    ),
    (
        "Shop/Billing/Invoice.cs",
        r#"
using System.Threading.Tasks;

namespace Shop.Billing
{
    public class Invoice
    {
        public decimal Amount { get; set; }

        public Task<Receipt> PayAsync(IPaymentGateway gateway) => gateway.ChargeAsync(this);
    }

    public interface IPaymentGateway
    {
        Task<Receipt> ChargeAsync(Invoice invoice);
    }

    public class Receipt { }
}
"#,
    ),
    (
        "Reporting/SalesReport.cs",
        r#"
using System.Collections.Generic;
using Shop;

namespace Reporting
{
    public class SalesReport
    {
        public Dictionary<Customer, List<Order>> ByCustomer { get; } = new();
    }
}
"#,
    ),
];
