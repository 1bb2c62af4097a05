// 🔤 Fixed UI labels per locale
// Only the selection mechanism matters here; the table is the whole translation set.

use crate::locale::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    TabAccounts,
    TabTransactions,
    TabActions,
    TotalBalance,
    AccountSavings,
    AccountCurrent,
    AccountInvestment,
    ActionTransfer,
    ActionPay,
    ActionTopUp,
    ActionStatement,
    ActionExchange,
    ActionCards,
    ColumnDate,
    ColumnMerchant,
    ColumnCategory,
    ColumnAmount,
    HintToggle,
    HintToggleAll,
    HintLanguage,
    HintTabs,
    HintQuit,
    Hidden,
}

/// Label text in `locale`
pub fn t(locale: Locale, label: Label) -> &'static str {
    use Label::*;

    match locale {
        Locale::En => match label {
            TabAccounts => "Accounts",
            TabTransactions => "Transactions",
            TabActions => "Quick actions",
            TotalBalance => "Total balance",
            AccountSavings => "Savings",
            AccountCurrent => "Current",
            AccountInvestment => "Investment",
            ActionTransfer => "Transfer",
            ActionPay => "Pay",
            ActionTopUp => "Top up",
            ActionStatement => "Statement",
            ActionExchange => "Exchange",
            ActionCards => "Cards",
            ColumnDate => "Date",
            ColumnMerchant => "Merchant",
            ColumnCategory => "Category",
            ColumnAmount => "Amount",
            HintToggle => "Show/hide",
            HintToggleAll => "All",
            HintLanguage => "Language",
            HintTabs => "Tab",
            HintQuit => "Quit",
            Hidden => "hidden",
        },
        Locale::Ru => match label {
            TabAccounts => "Счета",
            TabTransactions => "Операции",
            TabActions => "Быстрые действия",
            TotalBalance => "Общий баланс",
            AccountSavings => "Сбережения",
            AccountCurrent => "Текущий",
            AccountInvestment => "Инвестиции",
            ActionTransfer => "Перевод",
            ActionPay => "Оплата",
            ActionTopUp => "Пополнить",
            ActionStatement => "Выписка",
            ActionExchange => "Обмен",
            ActionCards => "Карты",
            ColumnDate => "Дата",
            ColumnMerchant => "Получатель",
            ColumnCategory => "Категория",
            ColumnAmount => "Сумма",
            HintToggle => "Показать/скрыть",
            HintToggleAll => "Все",
            HintLanguage => "Язык",
            HintTabs => "Вкладка",
            HintQuit => "Выход",
            Hidden => "скрыто",
        },
    }
}
