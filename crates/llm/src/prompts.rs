//! Prompt templates

use domain::Product;

pub fn description_prompt(name: &str, category: &str) -> String {
    format!(
        "Generate a compelling and concise product description (around 50-70 words) for a digital product named \"{name}\" in the category \"{category}\". Focus on the key benefits for the user."
    )
}

pub fn marketing_copy_prompt(product: &Product) -> String {
    format!(
        r#"Based on the following digital product, generate marketing copy.
Product Name: {name}
Description: {description}
Category: {category}
Price: ${price}

Return a JSON object with the following structure: {{ "adHeadline": "string", "adBody": "string", "socialMediaPost": "string" }}.
The ad headline should be catchy and under 10 words.
The ad body should be persuasive and around 30-40 words.
The social media post should be engaging, include 2-3 relevant hashtags, and be suitable for platforms like Twitter or LinkedIn."#,
        name = product.name,
        description = product.description,
        category = product.category,
        price = product.price,
    )
}

pub fn analysis_prompt(description: &str) -> String {
    format!(
        r#"Analyze the following product description:
"{description}"

Provide an analysis in a JSON object with the following structure: {{ "tone": "string", "clarityScore": number, "suggestions": ["string"] }}.
- "tone": Describe the tone of the text (e.g., "Professional and confident", "Casual and friendly").
- "clarityScore": A score from 1 to 10 on how clear and easy to understand the description is.
- "suggestions": An array of 2-3 actionable suggestions to improve the description."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain::ProductStatus;

    #[test]
    fn test_description_prompt_mentions_inputs() {
        let prompt = description_prompt("Widget", "Tool");
        assert!(prompt.contains("named \"Widget\""));
        assert!(prompt.contains("category \"Tool\""));
        assert!(prompt.contains("50-70 words"));
    }

    #[test]
    fn test_marketing_prompt_lists_product() {
        let product = Product {
            id: "p".to_string(),
            name: "Course".to_string(),
            description: "Learn things".to_string(),
            category: "Online Course".to_string(),
            price: 249.0,
            status: ProductStatus::Published,
            image_url: None,
            created_at: Utc::now(),
        };
        let prompt = marketing_copy_prompt(&product);
        assert!(prompt.contains("Product Name: Course"));
        assert!(prompt.contains("Price: $249\n"));
        assert!(prompt.contains("\"adHeadline\": \"string\""));
    }

    #[test]
    fn test_analysis_prompt_quotes_description() {
        let prompt = analysis_prompt("Fast and simple.");
        assert!(prompt.contains("\"Fast and simple.\""));
        assert!(prompt.contains("2-3 actionable suggestions"));
    }
}
