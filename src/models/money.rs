// ============================================================================
// Formatage monétaire
// ============================================================================
// Convertit les montants en texte affichable dans une devise donnée
//
// CONCEPTS RUST :
// 1. Option<f64> en entrée : une valeur absente donne une chaîne vide
// 2. &'static str : table des symboles de devise sans allocation
// 3. Iterators sur chars : regroupement des milliers
// ============================================================================

/// Retourne le symbole associé à un code devise (insensible à la casse)
///
/// CONCEPT RUST : match sur &str
/// - Les codes inconnus retournent None, l'appelant affiche le code lui-même
pub fn currency_symbol(currency: &str) -> Option<&'static str> {
    match currency.to_ascii_lowercase().as_str() {
        "usd" => Some("$"),
        "eur" => Some("€"),
        "gbp" => Some("£"),
        "jpy" | "cny" => Some("¥"),
        "krw" => Some("₩"),
        "inr" => Some("₹"),
        "btc" => Some("₿"),
        "eth" => Some("Ξ"),
        _ => None,
    }
}

/// Formate un montant dans la devise donnée
///
/// # Arguments
/// * `value` - Montant (None → chaîne vide)
/// * `currency` - Code devise (ex: "usd", "eur")
/// * `digits` - Nombre exact de décimales
///
/// # Exemple
/// format_currency(Some(50000.0), "usd", 2) == "$50,000.00"
/// format_currency(Some(-5.0), "chf", 2) == "-CHF 5.00"
pub fn format_currency(value: Option<f64>, currency: &str, digits: usize) -> String {
    let value = match value {
        Some(v) if v.is_finite() => v,
        _ => return String::new(),
    };

    let formatted = format!("{:.*}", digits, value.abs());
    let (integer, fraction) = match formatted.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (formatted.as_str(), None),
    };

    let mut amount = group_thousands(integer);
    if let Some(fraction) = fraction {
        amount.push('.');
        amount.push_str(fraction);
    }

    // Pas de "-$0.00" quand l'arrondi tombe sur zéro
    let is_zero = formatted.chars().all(|c| c == '0' || c == '.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    match currency_symbol(currency) {
        Some(symbol) => format!("{}{}{}", sign, symbol, amount),
        None => format!("{}{} {}", sign, currency.to_uppercase(), amount),
    }
}

/// Formate la variation en pourcentage telle que fournie, suivie de "%"
///
/// Pas d'arrondi : -2.5 → "-2.5%", 3.0 → "3%"
/// None → chaîne vide
pub fn format_change(change: Option<f64>) -> String {
    match change {
        // Évite l'affichage de "-0%"
        Some(change) if change == 0.0 => "0%".to_string(),
        Some(change) => format!("{}%", change),
        None => String::new(),
    }
}

/// Insère un séparateur "," tous les trois chiffres
///
/// CONCEPT RUST : Iterator avec enumerate
/// - On parcourt les chiffres de gauche à droite
/// - Une virgule est insérée quand le nombre de chiffres restants est un multiple de 3
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    grouped
}

// ============================================================================
// Tests unitaires
// ============================================================================
