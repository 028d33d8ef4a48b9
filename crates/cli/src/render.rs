//! Terminal rendering of lists and the detail view.

use colored::Colorize;
use pipeline::BrowseQuery;
use recipe_model::Recipe;
use server::ViewState;

/// Five-star bar for a rating, rounded to whole stars
fn stars(rating: f64) -> String {
    let full = rating.round().clamp(0.0, 5.0) as usize;
    format!("{}{}", "★".repeat(full), "☆".repeat(5 - full))
}

/// Print the heading, the match count and one line per recipe.
pub fn print_list(query: &BrowseQuery, recipes: &[&Recipe]) {
    println!(
        "{}  {}",
        query.category.heading().bold().blue(),
        format!("{} recetas encontradas", recipes.len()).dimmed()
    );
    if !query.search.is_empty() {
        println!("  búsqueda: \"{}\"", query.search);
    }

    if recipes.is_empty() {
        println!("No se encontraron recetas con esos criterios.");
        println!("Usa 'reset' para ver todas las recetas.");
        return;
    }

    for recipe in recipes {
        println!(
            "{} {} [{}] {} {:.1} ({} votos)",
            "•".green(),
            recipe.title.bold(),
            recipe.id.cyan(),
            stars(recipe.rating).yellow(),
            recipe.rating,
            recipe.votes
        );
        if !recipe.summary.is_empty() {
            println!("    {}", recipe.summary);
        }
    }
}

/// Print the full detail view for one recipe.
pub fn print_detail(recipe: &Recipe, image: Option<&str>) {
    println!("{}", recipe.category.as_str().to_uppercase().on_green());
    println!("{}", recipe.title.bold().blue());
    println!(
        "{} {:.1}  {}",
        stars(recipe.rating).yellow(),
        recipe.rating,
        format!("{} votos", recipe.votes).dimmed()
    );
    println!();
    println!("{}", recipe.description().italic());

    println!();
    println!("{}", "Ingredientes".bold());
    for ingredient in &recipe.ingredients {
        println!("  {} {}", "•".green(), ingredient);
    }

    println!();
    println!("{}", "Preparación".bold());
    for (i, step) in recipe.steps.iter().enumerate() {
        println!("  {}. {}", (i + 1).to_string().green(), step);
    }

    if let Some(image) = image {
        println!();
        if image.starts_with("data:") {
            println!("{} foto generada por IA ({} caracteres)", "Imagen:".bold(), image.len());
        } else {
            println!("{} {}", "Imagen:".bold(), image);
        }
    }
}

/// Print the detail view for the controller's selection, with its
/// session flags.
pub fn print_view(view: &ViewState, image: Option<&str>) {
    let Some(recipe) = view.selected.as_ref() else {
        println!("No hay ninguna receta abierta.");
        return;
    };
    print_detail(recipe, image);
    println!();
    if view.detached {
        println!("{}", "Esta receta ya no está en la carta actual.".dimmed());
    } else if view.has_voted {
        println!("{}", "¡Gracias por tu valoración!".green());
    } else {
        println!("Valora esta receta con 'rate <1-5>'.");
    }
    if view.image_pending {
        println!("{}", "Generando foto...".magenta());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stars() {
        assert_eq!(stars(4.4), "★★★★☆");
        assert_eq!(stars(4.5), "★★★★★");
        assert_eq!(stars(0.0), "☆☆☆☆☆");
    }
}
