//! Localized user-facing messages.

use serde::{Deserialize, Serialize};

/// Output language.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Ru,
}

/// Message keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    ErrorWhois,
    WhoisNotFound,
    DomainIpError,
    NoRoutes,
    InvalidNetworkFormat,
    AsInfo,
    As,
    Ip,
    BgpPrefix,
    Country,
    Registry,
    Allocated,
    AsName,
    MergedNetworks,
    Networks,
    NoInfo,
    PleaseWait,
    Usage,
    Interrupted,
}

const USAGE_EN: &str = "
Usage Guide:
This tool analyzes AS and routes with network aggregation.

Examples:
  asn-route-summary 15169
  asn-route-summary 15169 --tolerance 8
  asn-route-summary 15169 --no-merge
  asn-route-summary 15169 --tolerance 8 -m --no-merge

  asn-route-summary 8.8.8.8
  asn-route-summary 8.8.8.8 -r
  asn-route-summary 8.8.8.8 -m
  asn-route-summary example.com -r -m --no-merge

  asn-route-summary --help
  asn-route-summary help --lang ru
";

const USAGE_RU: &str = "
Инструкция:
Программа анализирует автономные системы (AS) и маршруты с укрупнением сетей.

Примеры:
  asn-route-summary 15169
  asn-route-summary 15169 --tolerance 8
  asn-route-summary 15169 --no-merge
  asn-route-summary 15169 --tolerance 8 -m --no-merge

  asn-route-summary 8.8.8.8
  asn-route-summary 8.8.8.8 -r
  asn-route-summary 8.8.8.8 -m
  asn-route-summary example.com -r -m --no-merge

  asn-route-summary --help
  asn-route-summary help --lang en
";

impl Lang {
    /// Text of `msg` in this language.
    pub fn text(self, msg: Msg) -> &'static str {
        match self {
            Lang::En => match msg {
                Msg::ErrorWhois => "Error executing whois",
                Msg::WhoisNotFound => "Whois command not found. Ensure it is installed.",
                Msg::DomainIpError => "Error: Could not resolve IP for domain",
                Msg::NoRoutes => "No routes found for",
                Msg::InvalidNetworkFormat => "Invalid network format",
                Msg::AsInfo => "AS Information:",
                Msg::As => "AS:",
                Msg::Ip => "IP:",
                Msg::BgpPrefix => "BGP Prefix:",
                Msg::Country => "Country:",
                Msg::Registry => "Registry:",
                Msg::Allocated => "Allocated:",
                Msg::AsName => "AS Name:",
                Msg::MergedNetworks => "Merged Networks:",
                Msg::Networks => "Networks:",
                Msg::NoInfo => "No information found for",
                Msg::PleaseWait => "(Please wait...)",
                Msg::Usage => USAGE_EN,
                Msg::Interrupted => "Interrupted by user.",
            },
            Lang::Ru => match msg {
                Msg::ErrorWhois => "Ошибка выполнения whois",
                Msg::WhoisNotFound => "Команда whois не найдена. Убедитесь, что она установлена.",
                Msg::DomainIpError => "Ошибка: Не удалось найти IP для домена",
                Msg::NoRoutes => "Нет маршрутов для",
                Msg::InvalidNetworkFormat => "Неверный формат сети",
                Msg::AsInfo => "Информация об AS:",
                Msg::As => "AS:",
                Msg::Ip => "IP:",
                Msg::BgpPrefix => "BGP Prefix:",
                Msg::Country => "Страна:",
                Msg::Registry => "Реестр:",
                Msg::Allocated => "Выделено:",
                Msg::AsName => "Название AS:",
                Msg::MergedNetworks => "Объединённые сети:",
                Msg::Networks => "Сети:",
                Msg::NoInfo => "Нет информации о",
                Msg::PleaseWait => "(Пожалуйста подождите...)",
                Msg::Usage => USAGE_RU,
                Msg::Interrupted => "Прервано пользователем.",
            },
        }
    }
}
