use crate::model::Customer;

/// Customers whose name or phone contains `query`, ignoring case.
///
/// A blank query matches everyone. Any other query is matched as typed, spaces
/// included. Order is always the input order.
pub fn filter_customers<'a>(customers: &'a [Customer], query: &str) -> Vec<&'a Customer> {
    if query.trim().is_empty() {
        return customers.iter().collect();
    }
    let term = query.to_lowercase();

    customers
        .iter()
        .filter(|c| {
            c.name.to_lowercase().contains(&term) || c.phone.to_lowercase().contains(&term)
        })
        .collect()
}

pub fn select_customer<'a>(customers: &'a [Customer], id: &str) -> Option<&'a Customer> {
    customers.iter().find(|c| c.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(id: &str, name: &str, phone: &str) -> Customer {
        Customer {
            id: id.into(),
            name: name.into(),
            phone: phone.into(),
            notes: String::new(),
            transactions: Vec::new(),
        }
    }

    fn regulars() -> Vec<Customer> {
        vec![
            customer("C1", "Alice", "555-0101"),
            customer("C2", "Bob", "555-0199"),
            customer("C3", "Malik", ""),
        ]
    }

    #[test]
    fn blank_query_returns_everyone_in_order() {
        let all = regulars();
        for query in ["", "   "] {
            let ids: Vec<&str> = filter_customers(&all, query)
                .iter()
                .map(|c| c.id.as_str())
                .collect();
            assert_eq!(ids, vec!["C1", "C2", "C3"]);
        }
    }

    #[test]
    fn matches_name_case_insensitively() {
        let all = regulars();
        let ids: Vec<&str> = filter_customers(&all, "ALI")
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["C1", "C3"]);
    }

    #[test]
    fn matches_phone() {
        let all = regulars();
        let found = filter_customers(&all, "0199");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Bob");
    }

    #[test]
    fn surrounding_spaces_are_part_of_the_query() {
        let all = vec![
            customer("C1", "John Smith", ""),
            customer("C2", "Smithers", ""),
        ];
        let ids: Vec<&str> = filter_customers(&all, " smith")
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["C1"]);
    }

    #[test]
    fn no_match_is_empty() {
        let all = regulars();
        assert!(filter_customers(&all, "zed").is_empty());
    }

    #[test]
    fn selects_by_exact_id() {
        let all = regulars();
        assert_eq!(select_customer(&all, "C2").map(|c| c.name.as_str()), Some("Bob"));
        assert!(select_customer(&all, "c2").is_none());
        assert!(select_customer(&all, "").is_none());
    }
}
