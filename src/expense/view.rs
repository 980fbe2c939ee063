//! HTML rendering for the expenses page.

use maud::{Markup, html};
use time::Date;

use crate::{
    endpoints,
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base, dollar_input_styles, format_currency, loading_spinner,
    },
    month::ActiveMonth,
};

use super::{form::expense_form_fields, models::ExpenseRow};

pub(crate) fn expenses_view(
    month: ActiveMonth,
    today: Date,
    rows: &[ExpenseRow],
    total: f64,
) -> Markup {
    let export_url = format!("{}?month={month}", endpoints::EXPORT_CSV);
    let spinner = loading_spinner();

    let content = html! {
        main class=(PAGE_CONTAINER_STYLE)
        {
            section id="expenses-content" class="w-full lg:max-w-3xl space-y-6"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Expenses" }

                    a href=(export_url) class=(LINK_STYLE) { "Export CSV" }
                }

                form
                    hx-post=(endpoints::EXPENSES_API)
                    hx-target-error="#alert-container"
                    hx-swap="outerHTML"
                    class="space-y-4 rounded bg-gray-50 dark:bg-gray-800 p-6"
                {
                    h2 class="text-lg font-bold" { "New Expense" }

                    (expense_form_fields(today))

                    input type="hidden" name="month" value=(month);

                    button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
                    {
                        span
                            id="indicator"
                            class="inline htmx-indicator"
                        {
                            (spinner)
                        }
                        " Add Expense"
                    }
                }

                section class="rounded bg-gray-50 dark:bg-gray-800 overflow-hidden"
                {
                    div class="flex justify-between flex-wrap items-end gap-4 px-6 py-4"
                    {
                        div
                        {
                            label
                                for="month"
                                class=(FORM_LABEL_STYLE)
                            {
                                "Month"
                            }

                            input
                                name="month"
                                id="month"
                                type="month"
                                value=(month)
                                hx-get=(endpoints::EXPENSES_VIEW)
                                hx-trigger="change"
                                hx-target="#expenses-content"
                                hx-select="#expenses-content"
                                hx-swap="outerHTML"
                                hx-push-url="true"
                                class=(FORM_TEXT_INPUT_STYLE);
                        }

                        p class="text-sm pb-2.5"
                        {
                            "Month total: "
                            span id="month-total" class="font-semibold"
                            {
                                (format_currency(total))
                            }
                        }
                    }

                    table class="w-full my-2 text-sm text-left rtl:text-right
                        text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Date"
                                }
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Category"
                                }
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Note"
                                }
                                th scope="col" class="px-6 py-3 text-right"
                                {
                                    "Amount"
                                }
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    span class="sr-only" { "Actions" }
                                }
                            }
                        }

                        tbody
                        {
                            @for row in rows {
                                (expense_row_view(row))
                            }

                            @if rows.is_empty() {
                                tr
                                {
                                    td
                                        colspan="5"
                                        data-empty-state="true"
                                        class="px-6 py-4 text-center"
                                    {
                                        "No expenses in this month."
                                    }
                                }
                            }
                        }
                    }
                }

                div class="flex justify-end"
                {
                    button
                        type="button"
                        hx-post=(endpoints::CLEAR_EXPENSES)
                        hx-confirm="Clear ALL saved expenses? This cannot be undone."
                        hx-target-error="#alert-container"
                        hx-swap="outerHTML"
                        class=(BUTTON_DELETE_STYLE)
                    {
                        "Clear All"
                    }
                }
            }
        }
    };

    base("Expenses", &[dollar_input_styles()], &content)
}

fn expense_row_view(row: &ExpenseRow) -> Markup {
    html! {
        tr class=(TABLE_ROW_STYLE) data-expense-row="true"
        {
            td class=(TABLE_CELL_STYLE) { (row.date) }
            td class=(TABLE_CELL_STYLE) { (row.category) }
            td class=(TABLE_CELL_STYLE) { (row.note) }
            td class="px-6 py-4 text-right" { (format_currency(row.amount)) }
            td class=(TABLE_CELL_STYLE)
            {
                button
                    hx-delete=(row.delete_url)
                    hx-target-error="#alert-container"
                    hx-swap="outerHTML"
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Delete"
                }
            }
        }
    }
}
