use maud::{Markup, html};
use time::Date;

use crate::html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE};

/// The input fields of the new-expense form.
///
/// `today` prefills the date input so the default matches the user's
/// wall-clock day. There is no upper bound on the date: planned spending
/// may be logged ahead of time.
pub(crate) fn expense_form_fields(today: Date) -> Markup {
    html! {
        div
        {
            label
                for="date"
                class=(FORM_LABEL_STYLE)
            {
                "Date"
            }

            input
                name="date"
                id="date"
                type="date"
                value=(today)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="amount"
                class=(FORM_LABEL_STYLE)
            {
                "Amount"
            }

            div class="input-wrapper w-full"
            {
                input
                    name="amount"
                    id="amount"
                    type="number"
                    step="0.01"
                    min="0.01"
                    placeholder="0.00"
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }

        div
        {
            label
                for="category"
                class=(FORM_LABEL_STYLE)
            {
                "Category"
            }

            input
                name="category"
                id="category"
                type="text"
                placeholder="Groceries"
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="note"
                class=(FORM_LABEL_STYLE)
            {
                "Note"
            }

            input
                name="note"
                id="note"
                type="text"
                placeholder="Optional note"
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};
    use time::macros::date;

    use super::expense_form_fields;

    #[test]
    fn form_fields_have_expected_inputs() {
        let fields = expense_form_fields(date!(2024 - 05 - 17));
        let markup = maud::html! { form { (fields) } };
        let document = Html::parse_document(&markup.into_string());

        let expected_inputs = [
            ("date", "date", true),
            ("amount", "number", true),
            ("category", "text", true),
            ("note", "text", false),
        ];

        for (name, element_type, required) in expected_inputs {
            let selector =
                Selector::parse(&format!("input[name={name}][type={element_type}]")).unwrap();
            let inputs = document.select(&selector).collect::<Vec<_>>();
            assert_eq!(inputs.len(), 1, "want 1 {name} input, got {}", inputs.len());

            let is_required = inputs[0].value().attr("required").is_some();
            assert_eq!(
                is_required, required,
                "want {name} input required={required}, got {is_required}"
            );
        }
    }

    #[test]
    fn date_input_defaults_to_today() {
        let fields = expense_form_fields(date!(2024 - 05 - 17));
        let markup = maud::html! { form { (fields) } };
        let document = Html::parse_document(&markup.into_string());

        let selector = Selector::parse("input[name=date]").unwrap();
        let input = document.select(&selector).next().expect("No date input");

        assert_eq!(input.value().attr("value"), Some("2024-05-17"));
    }
}
