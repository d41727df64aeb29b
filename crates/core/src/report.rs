//! The fixed catalogs of named reports and mutations.
//!
//! Every statement the application can run is declared here: SQL text with
//! positional placeholders, the parameter types those placeholders bind
//! to, and the output column list with its presentation format. Shapes are
//! statically known; nothing is inferred from returned rows.
//!
//! Two report catalogs exist over the same schema. The management catalog
//! backs the CRUD panels and computes revenue as `Qty * Price`; the
//! analytics catalog is the named-query dashboard and reads `PAmount` /
//! `Ads.Revenue` where the reporting side does. They are deliberately not
//! reconciled.

use crate::value::{ColumnFormat, ParamKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub format: ColumnFormat,
}

impl ColumnSpec {
    #[must_use]
    pub const fn new(name: &'static str, format: ColumnFormat) -> Self {
        Self { name, format }
    }

    #[must_use]
    pub const fn plain(name: &'static str) -> Self {
        Self::new(name, ColumnFormat::Plain)
    }

    #[must_use]
    pub const fn currency(name: &'static str) -> Self {
        Self::new(name, ColumnFormat::Currency)
    }

    #[must_use]
    pub const fn percent(name: &'static str) -> Self {
        Self::new(name, ColumnFormat::Percent)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Catalog {
    Management,
    Analytics,
}

/// All read-only reports. Variant order matches `REPORTS`; `def()` relies
/// on it and a test pins the alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportId {
    DashboardSummary,
    ProductList,
    ProductsByCategory,
    ProductsInPriceRange,
    LowStock,
    CustomerList,
    CustomersByCity,
    CampaignList,
    BusinessLedger,
    AdList,
    AdsAtLoss,
    TopSearchedByAgeGroup,
    MostPurchasedInPriceRange,
    RevenueByPlatform,
    CategoriesOfProduct,
    SearchByMaterial,
    SortProductsByPrice,
    CustomersInCity,
    SaleOfProduct,
    SaleByCategory,
    TopCustomersBySpending,
    TotalQuantitySold,
    AvgPricePerCategory,
    TopSellingPerRegion,
    RevenuePerCategory,
    CampaignsByRoi,
    TopCustomersByYear,
    ProductsNotSoldLastMonth,
    TrendingProducts,
    HighBounceRateProducts,
    CampaignReportsPerRegion,
    AdsRunningAtLoss,
    AdsWithHighConversion,
    RestockPriority,
    LowStockAlerts,
}

impl ReportId {
    #[must_use]
    pub fn def(self) -> &'static ReportDef {
        &REPORTS[self as usize]
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ReportDef {
    pub id: ReportId,
    pub catalog: Catalog,
    pub title: &'static str,
    pub sql: &'static str,
    pub params: &'static [ParamKind],
    pub param_labels: &'static [&'static str],
    pub columns: &'static [ColumnSpec],
}

const AD_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::plain("AdsID"),
    ColumnSpec::plain("Platform"),
    ColumnSpec::plain("AgeGroup"),
    ColumnSpec::plain("Impressions"),
    ColumnSpec::plain("Conversions"),
    ColumnSpec::currency("Revenue"),
    ColumnSpec::currency("Cost"),
    ColumnSpec::percent("ROI"),
];

const PRODUCT_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::plain("ProductID"),
    ColumnSpec::plain("Name"),
    ColumnSpec::plain("Category"),
    ColumnSpec::currency("Price"),
    ColumnSpec::plain("Stock"),
];

const CUSTOMER_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::plain("CustomerID"),
    ColumnSpec::plain("Name"),
    ColumnSpec::plain("Gender"),
    ColumnSpec::plain("AgeGroup"),
    ColumnSpec::plain("City"),
];

pub static REPORTS: [ReportDef; 35] = [
    ReportDef {
        id: ReportId::DashboardSummary,
        catalog: Catalog::Management,
        title: "Business Overview",
        sql: "SELECT 'Total Products' AS Metric, CAST(COUNT(*) AS CHAR) AS Value FROM Product \
              UNION ALL SELECT 'Total Customers', CAST(COUNT(*) AS CHAR) FROM Customer \
              UNION ALL SELECT 'Total Transactions', CAST(COUNT(*) AS CHAR) FROM Business \
              UNION ALL SELECT 'Active Campaigns', CAST(COUNT(*) AS CHAR) FROM Campaign \
              UNION ALL SELECT 'Low Stock Items', CAST(COUNT(*) AS CHAR) FROM Product WHERE Stock <= 10 \
              UNION ALL SELECT 'Total Revenue', \
              CONCAT('₹', CAST(COALESCE(SUM(b.Qty * p.Price), 0) AS DECIMAL(12, 2))) \
              FROM Business b JOIN Product p ON b.ProductID = p.ProductID",
        params: &[],
        param_labels: &[],
        columns: &[ColumnSpec::plain("Metric"), ColumnSpec::plain("Value")],
    },
    ReportDef {
        id: ReportId::ProductList,
        catalog: Catalog::Management,
        title: "Products",
        sql: "SELECT ProductID, Name, Category, Price, Stock FROM Product ORDER BY ProductID",
        params: &[],
        param_labels: &[],
        columns: PRODUCT_COLUMNS,
    },
    ReportDef {
        id: ReportId::ProductsByCategory,
        catalog: Catalog::Management,
        title: "Products by Category",
        sql: "SELECT ProductID, Name, Category, Price, Stock FROM Product \
              WHERE Category LIKE CONCAT('%', ?, '%') ORDER BY Price",
        params: &[ParamKind::Text],
        param_labels: &["Category"],
        columns: PRODUCT_COLUMNS,
    },
    ReportDef {
        id: ReportId::ProductsInPriceRange,
        catalog: Catalog::Management,
        title: "Products in Price Range",
        sql: "SELECT ProductID, Name, Category, Price, Stock FROM Product \
              WHERE Price BETWEEN ? AND ? ORDER BY Price",
        params: &[ParamKind::Float, ParamKind::Float],
        param_labels: &["Minimum price", "Maximum price"],
        columns: PRODUCT_COLUMNS,
    },
    ReportDef {
        id: ReportId::LowStock,
        catalog: Catalog::Management,
        title: "Low Stock",
        sql: "SELECT ProductID, Name, Category, Price, Stock FROM Product \
              WHERE Stock <= ? ORDER BY Stock ASC",
        params: &[ParamKind::Int],
        param_labels: &["Stock threshold"],
        columns: PRODUCT_COLUMNS,
    },
    ReportDef {
        id: ReportId::CustomerList,
        catalog: Catalog::Management,
        title: "Customers",
        sql: "SELECT CustomerID, Name, Gender, AgeGroup, City FROM Customer ORDER BY CustomerID",
        params: &[],
        param_labels: &[],
        columns: CUSTOMER_COLUMNS,
    },
    ReportDef {
        id: ReportId::CustomersByCity,
        catalog: Catalog::Management,
        title: "Customers by City",
        sql: "SELECT CustomerID, Name, Gender, AgeGroup, City FROM Customer WHERE City = ?",
        params: &[ParamKind::Text],
        param_labels: &["City"],
        columns: CUSTOMER_COLUMNS,
    },
    ReportDef {
        id: ReportId::CampaignList,
        catalog: Catalog::Management,
        title: "Campaigns",
        sql: "SELECT CampaignID, Name, Type, Discount, StartDate, EndDate \
              FROM Campaign ORDER BY CampaignID",
        params: &[],
        param_labels: &[],
        columns: &[
            ColumnSpec::plain("CampaignID"),
            ColumnSpec::plain("Name"),
            ColumnSpec::plain("Type"),
            ColumnSpec::percent("Discount"),
            ColumnSpec::plain("StartDate"),
            ColumnSpec::plain("EndDate"),
        ],
    },
    ReportDef {
        id: ReportId::BusinessLedger,
        catalog: Catalog::Management,
        title: "Business Transactions",
        sql: "SELECT b.ProductID, p.Name AS ProductName, b.CustomerID, c.Name AS CustomerName, \
              b.PDate, b.Qty, b.PAmount \
              FROM Business b \
              JOIN Product p ON b.ProductID = p.ProductID \
              JOIN Customer c ON b.CustomerID = c.CustomerID \
              ORDER BY b.PDate DESC",
        params: &[],
        param_labels: &[],
        columns: &[
            ColumnSpec::plain("ProductID"),
            ColumnSpec::plain("ProductName"),
            ColumnSpec::plain("CustomerID"),
            ColumnSpec::plain("CustomerName"),
            ColumnSpec::plain("PDate"),
            ColumnSpec::plain("Qty"),
            ColumnSpec::currency("PAmount"),
        ],
    },
    ReportDef {
        id: ReportId::AdList,
        catalog: Catalog::Management,
        title: "Advertisements",
        sql: "SELECT AdsID, Platform, AgeGroup, Impressions, Conversions, Revenue, Cost, \
              ROUND((Revenue - Cost) / NULLIF(Cost, 0) * 100, 2) AS ROI \
              FROM Ads ORDER BY AdsID",
        params: &[],
        param_labels: &[],
        columns: AD_COLUMNS,
    },
    ReportDef {
        id: ReportId::AdsAtLoss,
        catalog: Catalog::Management,
        title: "Ads at Loss",
        sql: "SELECT AdsID, Platform, AgeGroup, Impressions, Conversions, Revenue, Cost, \
              ROUND((Revenue - Cost) / NULLIF(Cost, 0) * 100, 2) AS ROI \
              FROM Ads WHERE Revenue < Cost ORDER BY ROI ASC",
        params: &[],
        param_labels: &[],
        columns: AD_COLUMNS,
    },
    ReportDef {
        id: ReportId::TopSearchedByAgeGroup,
        catalog: Catalog::Analytics,
        title: "Top Searched Products by Age Group",
        sql: "SELECT AgeGroup, ProductID, ProductName, Total_Impressions FROM ( \
              SELECT a.AgeGroup, p.ProductID, p.Name AS ProductName, \
              SUM(a.Impressions) AS Total_Impressions, \
              RANK() OVER (PARTITION BY a.AgeGroup ORDER BY SUM(a.Impressions) DESC) AS rnk \
              FROM Ads a \
              JOIN Products_Ads pa ON a.AdsID = pa.AdsID AND a.Platform = pa.Platform \
              JOIN Product p ON pa.ProductID = p.ProductID \
              GROUP BY a.AgeGroup, p.ProductID, p.Name) ranked \
              WHERE rnk = 1",
        params: &[],
        param_labels: &[],
        columns: &[
            ColumnSpec::plain("AgeGroup"),
            ColumnSpec::plain("ProductID"),
            ColumnSpec::plain("ProductName"),
            ColumnSpec::plain("Total_Impressions"),
        ],
    },
    ReportDef {
        id: ReportId::MostPurchasedInPriceRange,
        catalog: Catalog::Analytics,
        title: "Most Purchased in Price Range",
        sql: "SELECT p.ProductID, p.Name, p.Price, SUM(b.Qty) AS TotalBought \
              FROM Product p JOIN Business b ON p.ProductID = b.ProductID \
              WHERE p.Price BETWEEN ? AND ? \
              GROUP BY p.ProductID, p.Name, p.Price \
              ORDER BY TotalBought DESC",
        params: &[ParamKind::Float, ParamKind::Float],
        param_labels: &["Minimum price", "Maximum price"],
        columns: &[
            ColumnSpec::plain("ProductID"),
            ColumnSpec::plain("Name"),
            ColumnSpec::currency("Price"),
            ColumnSpec::plain("TotalBought"),
        ],
    },
    ReportDef {
        id: ReportId::RevenueByPlatform,
        catalog: Catalog::Analytics,
        title: "Revenue by Platform",
        sql: "SELECT Platform, SUM(Revenue) AS Total_Revenue \
              FROM Ads GROUP BY Platform ORDER BY Total_Revenue DESC",
        params: &[],
        param_labels: &[],
        columns: &[
            ColumnSpec::plain("Platform"),
            ColumnSpec::currency("Total_Revenue"),
        ],
    },
    ReportDef {
        id: ReportId::CategoriesOfProduct,
        catalog: Catalog::Analytics,
        title: "Categories of Product",
        sql: "SELECT DISTINCT Category FROM Product \
              WHERE Name LIKE CONCAT('%', ?, '%') ORDER BY Category",
        params: &[ParamKind::Text],
        param_labels: &["Product name"],
        columns: &[ColumnSpec::plain("Category")],
    },
    ReportDef {
        id: ReportId::SearchByMaterial,
        catalog: Catalog::Analytics,
        title: "Products by Material",
        sql: "SELECT ProductID, Name, Category, Price, Stock FROM Product \
              WHERE LOWER(Name) LIKE LOWER(CONCAT('%', ?, '%')) ORDER BY Price",
        params: &[ParamKind::Text],
        param_labels: &["Material"],
        columns: PRODUCT_COLUMNS,
    },
    ReportDef {
        id: ReportId::SortProductsByPrice,
        catalog: Catalog::Analytics,
        title: "Products Sorted by Price",
        sql: "SELECT ProductID, Name, Category, Price, Stock FROM Product ORDER BY Price DESC",
        params: &[],
        param_labels: &[],
        columns: PRODUCT_COLUMNS,
    },
    ReportDef {
        id: ReportId::CustomersInCity,
        catalog: Catalog::Analytics,
        title: "Customers in City",
        sql: "SELECT CustomerID, Name, Gender, AgeGroup, City FROM Customer \
              WHERE City = ? ORDER BY CustomerID",
        params: &[ParamKind::Text],
        param_labels: &["City"],
        columns: CUSTOMER_COLUMNS,
    },
    ReportDef {
        id: ReportId::SaleOfProduct,
        catalog: Catalog::Analytics,
        title: "Sales of Product",
        sql: "SELECT b.PDate, c.Name AS CustomerName, b.Qty, b.PAmount \
              FROM Business b \
              JOIN Product p ON b.ProductID = p.ProductID \
              JOIN Customer c ON b.CustomerID = c.CustomerID \
              WHERE p.Name LIKE CONCAT('%', ?, '%') \
              ORDER BY b.PDate DESC",
        params: &[ParamKind::Text],
        param_labels: &["Product name"],
        columns: &[
            ColumnSpec::plain("PDate"),
            ColumnSpec::plain("CustomerName"),
            ColumnSpec::plain("Qty"),
            ColumnSpec::currency("PAmount"),
        ],
    },
    ReportDef {
        id: ReportId::SaleByCategory,
        catalog: Catalog::Analytics,
        title: "Sales by Category",
        sql: "SELECT p.Name, SUM(b.Qty) AS TotalQty, SUM(b.PAmount) AS TotalAmount \
              FROM Business b JOIN Product p ON b.ProductID = p.ProductID \
              WHERE p.Category = ? \
              GROUP BY p.Name ORDER BY TotalAmount DESC",
        params: &[ParamKind::Text],
        param_labels: &["Category"],
        columns: &[
            ColumnSpec::plain("Name"),
            ColumnSpec::plain("TotalQty"),
            ColumnSpec::currency("TotalAmount"),
        ],
    },
    ReportDef {
        id: ReportId::TopCustomersBySpending,
        catalog: Catalog::Analytics,
        title: "Top 5 Customers by Spending",
        sql: "SELECT c.CustomerID, c.Name AS CustomerName, SUM(b.Qty * p.Price) AS TotalSpent \
              FROM Customer c \
              JOIN Business b ON c.CustomerID = b.CustomerID \
              JOIN Product p ON b.ProductID = p.ProductID \
              GROUP BY c.CustomerID, c.Name \
              ORDER BY TotalSpent DESC LIMIT 5",
        params: &[],
        param_labels: &[],
        columns: &[
            ColumnSpec::plain("CustomerID"),
            ColumnSpec::plain("CustomerName"),
            ColumnSpec::currency("TotalSpent"),
        ],
    },
    ReportDef {
        id: ReportId::TotalQuantitySold,
        catalog: Catalog::Analytics,
        title: "Total Quantity Sold per Product",
        sql: "SELECT p.ProductID, p.Name AS ProductName, SUM(b.Qty) AS TotalSold \
              FROM Product p JOIN Business b ON p.ProductID = b.ProductID \
              GROUP BY p.ProductID, p.Name \
              ORDER BY TotalSold DESC",
        params: &[],
        param_labels: &[],
        columns: &[
            ColumnSpec::plain("ProductID"),
            ColumnSpec::plain("ProductName"),
            ColumnSpec::plain("TotalSold"),
        ],
    },
    ReportDef {
        id: ReportId::AvgPricePerCategory,
        catalog: Catalog::Analytics,
        title: "Average Price per Category",
        sql: "SELECT Category, ROUND(AVG(Price), 2) AS AvgPrice \
              FROM Product GROUP BY Category ORDER BY AvgPrice DESC",
        params: &[],
        param_labels: &[],
        columns: &[
            ColumnSpec::plain("Category"),
            ColumnSpec::currency("AvgPrice"),
        ],
    },
    ReportDef {
        id: ReportId::TopSellingPerRegion,
        catalog: Catalog::Analytics,
        title: "Top Selling Products per Region",
        sql: "SELECT RegionName, ProductName, TotalSold FROM ( \
              SELECT r.Region AS RegionName, p.Name AS ProductName, SUM(b.Qty) AS TotalSold, \
              RANK() OVER (PARTITION BY r.Region ORDER BY SUM(b.Qty) DESC) AS rank_in_region \
              FROM Regional_info r \
              JOIN Customer c ON r.City = c.City \
              JOIN Business b ON b.CustomerID = c.CustomerID \
              JOIN Product p ON b.ProductID = p.ProductID \
              GROUP BY r.Region, p.Name) ranked \
              WHERE rank_in_region <= 5",
        params: &[],
        param_labels: &[],
        columns: &[
            ColumnSpec::plain("RegionName"),
            ColumnSpec::plain("ProductName"),
            ColumnSpec::plain("TotalSold"),
        ],
    },
    ReportDef {
        id: ReportId::RevenuePerCategory,
        catalog: Catalog::Analytics,
        title: "Total Revenue per Category",
        sql: "SELECT p.Category, SUM(b.Qty * p.Price) AS TotalRevenue \
              FROM Product p JOIN Business b ON p.ProductID = b.ProductID \
              GROUP BY p.Category ORDER BY TotalRevenue DESC",
        params: &[],
        param_labels: &[],
        columns: &[
            ColumnSpec::plain("Category"),
            ColumnSpec::currency("TotalRevenue"),
        ],
    },
    ReportDef {
        id: ReportId::CampaignsByRoi,
        catalog: Catalog::Analytics,
        title: "Campaigns with Highest ROI",
        sql: "SELECT c.CampaignID, c.Name AS CampaignName, \
              SUM(a.Revenue) AS TotalRevenue, SUM(a.Cost) AS TotalCost, \
              ROUND((SUM(a.Revenue) - SUM(a.Cost)) / NULLIF(SUM(a.Cost), 0) * 100, 2) AS ROI \
              FROM Campaign c \
              JOIN Ads_Campaign ac ON c.CampaignID = ac.CampaignID \
              JOIN Ads a ON a.AdsID = ac.AdsID AND a.Platform = ac.Platform \
              GROUP BY c.CampaignID, c.Name \
              ORDER BY ROI DESC LIMIT ?",
        params: &[ParamKind::Int],
        param_labels: &["Number of campaigns"],
        columns: &[
            ColumnSpec::plain("CampaignID"),
            ColumnSpec::plain("CampaignName"),
            ColumnSpec::currency("TotalRevenue"),
            ColumnSpec::currency("TotalCost"),
            ColumnSpec::percent("ROI"),
        ],
    },
    ReportDef {
        id: ReportId::TopCustomersByYear,
        catalog: Catalog::Analytics,
        title: "Top 10 Customers by Year",
        sql: "SELECT SaleYear, CustomerID, CustomerName, TotalSpent, YearRank FROM ( \
              SELECT YEAR(b.PDate) AS SaleYear, c.CustomerID, c.Name AS CustomerName, \
              SUM(b.PAmount) AS TotalSpent, \
              RANK() OVER (PARTITION BY YEAR(b.PDate) ORDER BY SUM(b.PAmount) DESC) AS YearRank \
              FROM Business b JOIN Customer c ON b.CustomerID = c.CustomerID \
              GROUP BY YEAR(b.PDate), c.CustomerID, c.Name) ranked \
              WHERE YearRank <= 10 \
              ORDER BY SaleYear DESC, YearRank",
        params: &[],
        param_labels: &[],
        columns: &[
            ColumnSpec::plain("SaleYear"),
            ColumnSpec::plain("CustomerID"),
            ColumnSpec::plain("CustomerName"),
            ColumnSpec::currency("TotalSpent"),
            ColumnSpec::plain("YearRank"),
        ],
    },
    ReportDef {
        id: ReportId::ProductsNotSoldLastMonth,
        catalog: Catalog::Analytics,
        title: "Products Not Sold in Last Month",
        sql: "SELECT p.ProductID, p.Name, p.Category, p.Stock FROM Product p \
              WHERE p.ProductID NOT IN ( \
              SELECT DISTINCT ProductID FROM Business \
              WHERE PDate >= DATE_SUB(CURDATE(), INTERVAL 1 MONTH)) \
              ORDER BY p.ProductID",
        params: &[],
        param_labels: &[],
        columns: &[
            ColumnSpec::plain("ProductID"),
            ColumnSpec::plain("Name"),
            ColumnSpec::plain("Category"),
            ColumnSpec::plain("Stock"),
        ],
    },
    ReportDef {
        id: ReportId::TrendingProducts,
        catalog: Catalog::Analytics,
        title: "Trending Products",
        sql: "SELECT p.ProductID, p.Name, SUM(b.Qty) AS RecentSold \
              FROM Product p JOIN Business b ON p.ProductID = b.ProductID \
              WHERE b.PDate >= DATE_SUB(CURDATE(), INTERVAL 1 MONTH) \
              GROUP BY p.ProductID, p.Name \
              ORDER BY RecentSold DESC LIMIT 10",
        params: &[],
        param_labels: &[],
        columns: &[
            ColumnSpec::plain("ProductID"),
            ColumnSpec::plain("Name"),
            ColumnSpec::plain("RecentSold"),
        ],
    },
    ReportDef {
        id: ReportId::HighBounceRateProducts,
        catalog: Catalog::Analytics,
        title: "High Bounce Rate Products",
        sql: "SELECT p.ProductID, p.Name, SUM(a.Impressions) AS Impressions, \
              SUM(a.Conversions) AS Conversions, \
              ROUND((1 - SUM(a.Conversions) / NULLIF(SUM(a.Impressions), 0)) * 100, 2) AS BounceRate \
              FROM Ads a \
              JOIN Products_Ads pa ON a.AdsID = pa.AdsID AND a.Platform = pa.Platform \
              JOIN Product p ON pa.ProductID = p.ProductID \
              GROUP BY p.ProductID, p.Name \
              HAVING BounceRate >= 95 \
              ORDER BY BounceRate DESC",
        params: &[],
        param_labels: &[],
        columns: &[
            ColumnSpec::plain("ProductID"),
            ColumnSpec::plain("Name"),
            ColumnSpec::plain("Impressions"),
            ColumnSpec::plain("Conversions"),
            ColumnSpec::percent("BounceRate"),
        ],
    },
    ReportDef {
        id: ReportId::CampaignReportsPerRegion,
        catalog: Catalog::Analytics,
        title: "Campaign Reports by Region",
        sql: "SELECT r.Region, cp.Name AS CampaignName, SUM(b.PAmount) AS CampaignSales \
              FROM Campaign cp \
              JOIN Business b ON b.PDate BETWEEN cp.StartDate AND cp.EndDate \
              JOIN Customer c ON b.CustomerID = c.CustomerID \
              JOIN Regional_info r ON r.City = c.City \
              GROUP BY r.Region, cp.Name \
              ORDER BY r.Region, CampaignSales DESC",
        params: &[],
        param_labels: &[],
        columns: &[
            ColumnSpec::plain("Region"),
            ColumnSpec::plain("CampaignName"),
            ColumnSpec::currency("CampaignSales"),
        ],
    },
    ReportDef {
        id: ReportId::AdsRunningAtLoss,
        catalog: Catalog::Analytics,
        title: "Ads Running at Loss",
        sql: "SELECT AdsID, Platform, AgeGroup, Impressions, Conversions, Revenue, Cost, \
              ROUND((Revenue - Cost) / NULLIF(Cost, 0) * 100, 2) AS ROI \
              FROM Ads WHERE Revenue < Cost ORDER BY ROI ASC",
        params: &[],
        param_labels: &[],
        columns: AD_COLUMNS,
    },
    ReportDef {
        id: ReportId::AdsWithHighConversion,
        catalog: Catalog::Analytics,
        title: "Ads with High Conversion Rate",
        sql: "SELECT AdsID, Platform, AgeGroup, Impressions, Conversions, \
              ROUND(Conversions / NULLIF(Impressions, 0) * 100, 2) AS ConversionRate \
              FROM Ads \
              WHERE Conversions / NULLIF(Impressions, 0) * 100 >= 5 \
              ORDER BY ConversionRate DESC",
        params: &[],
        param_labels: &[],
        columns: &[
            ColumnSpec::plain("AdsID"),
            ColumnSpec::plain("Platform"),
            ColumnSpec::plain("AgeGroup"),
            ColumnSpec::plain("Impressions"),
            ColumnSpec::plain("Conversions"),
            ColumnSpec::percent("ConversionRate"),
        ],
    },
    ReportDef {
        id: ReportId::RestockPriority,
        catalog: Catalog::Analytics,
        title: "Restock Priority List",
        sql: "SELECT p.ProductID, p.Name, p.Stock, COALESCE(SUM(b.Qty), 0) AS SoldLastMonth \
              FROM Product p \
              LEFT JOIN Business b ON p.ProductID = b.ProductID \
              AND b.PDate >= DATE_SUB(CURDATE(), INTERVAL 1 MONTH) \
              GROUP BY p.ProductID, p.Name, p.Stock \
              ORDER BY p.Stock ASC, SoldLastMonth DESC",
        params: &[],
        param_labels: &[],
        columns: &[
            ColumnSpec::plain("ProductID"),
            ColumnSpec::plain("Name"),
            ColumnSpec::plain("Stock"),
            ColumnSpec::plain("SoldLastMonth"),
        ],
    },
    ReportDef {
        id: ReportId::LowStockAlerts,
        catalog: Catalog::Analytics,
        title: "Low Stock Alerts",
        sql: "SELECT ProductID, Name, Category, Stock FROM Product \
              WHERE Stock <= 5 ORDER BY Stock ASC",
        params: &[],
        param_labels: &[],
        columns: &[
            ColumnSpec::plain("ProductID"),
            ColumnSpec::plain("Name"),
            ColumnSpec::plain("Category"),
            ColumnSpec::plain("Stock"),
        ],
    },
];

/// Insert-style mutations. Variant order matches `MUTATIONS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationId {
    AddProduct,
    AddCustomer,
    AddCampaign,
    AddTransaction,
    AddAd,
}

impl MutationId {
    #[must_use]
    pub fn def(self) -> &'static MutationDef {
        &MUTATIONS[self as usize]
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct MutationDef {
    pub id: MutationId,
    pub title: &'static str,
    pub sql: &'static str,
    pub params: &'static [ParamKind],
    pub param_labels: &'static [&'static str],
    /// Report re-run after a successful write so the visible table refreshes.
    pub reload: ReportId,
}

pub static MUTATIONS: [MutationDef; 5] = [
    MutationDef {
        id: MutationId::AddProduct,
        title: "Add Product",
        sql: "INSERT INTO Product (ProductID, Name, Category, Price, Stock) VALUES (?, ?, ?, ?, ?)",
        params: &[
            ParamKind::Int,
            ParamKind::Text,
            ParamKind::Text,
            ParamKind::Float,
            ParamKind::Int,
        ],
        param_labels: &["Product ID", "Name", "Category", "Price", "Stock"],
        reload: ReportId::ProductList,
    },
    MutationDef {
        id: MutationId::AddCustomer,
        title: "Add Customer",
        sql: "INSERT INTO Customer (CustomerID, Name, Gender, AgeGroup, City) VALUES (?, ?, ?, ?, ?)",
        params: &[
            ParamKind::Int,
            ParamKind::Text,
            ParamKind::Text,
            ParamKind::Text,
            ParamKind::Text,
        ],
        param_labels: &["Customer ID", "Name", "Gender (M/F/O)", "Age group", "City"],
        reload: ReportId::CustomerList,
    },
    MutationDef {
        id: MutationId::AddCampaign,
        title: "Add Campaign",
        sql: "INSERT INTO Campaign (CampaignID, Name, Type, Discount, StartDate, EndDate) \
              VALUES (?, ?, ?, ?, ?, ?)",
        params: &[
            ParamKind::Int,
            ParamKind::Text,
            ParamKind::Text,
            ParamKind::Float,
            ParamKind::Date,
            ParamKind::Date,
        ],
        param_labels: &[
            "Campaign ID",
            "Name",
            "Type",
            "Discount %",
            "Start date (YYYY-MM-DD)",
            "End date (YYYY-MM-DD)",
        ],
        reload: ReportId::CampaignList,
    },
    MutationDef {
        id: MutationId::AddTransaction,
        title: "Add Transaction",
        sql: "INSERT INTO Business (ProductID, CustomerID, PDate, Qty) VALUES (?, ?, ?, ?)",
        params: &[
            ParamKind::Int,
            ParamKind::Int,
            ParamKind::Date,
            ParamKind::Int,
        ],
        param_labels: &["Product ID", "Customer ID", "Date (YYYY-MM-DD)", "Quantity"],
        reload: ReportId::BusinessLedger,
    },
    MutationDef {
        id: MutationId::AddAd,
        title: "Add Advertisement",
        sql: "INSERT INTO Ads (AdsID, Platform, AgeGroup, Impressions, Conversions, Revenue, Cost) \
              VALUES (?, ?, ?, ?, ?, ?, ?)",
        params: &[
            ParamKind::Int,
            ParamKind::Text,
            ParamKind::Text,
            ParamKind::Int,
            ParamKind::Int,
            ParamKind::Float,
            ParamKind::Float,
        ],
        param_labels: &[
            "Ad ID",
            "Platform",
            "Age group",
            "Impressions",
            "Conversions",
            "Revenue",
            "Cost",
        ],
        reload: ReportId::AdList,
    },
];

/// The closed set of product columns an update may touch. Each variant
/// maps to its own prepared statement; user input never names a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductField {
    Name,
    Category,
    Price,
    Stock,
}

impl ProductField {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Category => "Category",
            Self::Price => "Price",
            Self::Stock => "Stock",
        }
    }

    /// Positional parameters: new value first, then the product id.
    #[must_use]
    pub fn update_sql(self) -> &'static str {
        match self {
            Self::Name => "UPDATE Product SET Name = ? WHERE ProductID = ?",
            Self::Category => "UPDATE Product SET Category = ? WHERE ProductID = ?",
            Self::Price => "UPDATE Product SET Price = ? WHERE ProductID = ?",
            Self::Stock => "UPDATE Product SET Stock = ? WHERE ProductID = ?",
        }
    }

    #[must_use]
    pub fn value_kind(self) -> ParamKind {
        match self {
            Self::Name | Self::Category => ParamKind::Text,
            Self::Price => ParamKind::Float,
            Self::Stock => ParamKind::Int,
        }
    }
}

/// Stored-procedure invocation: a distinct mutation kind with no row set.
#[derive(Debug, PartialEq, Eq)]
pub struct ProcedureDef {
    pub title: &'static str,
    pub sql: &'static str,
}

pub const DISCOUNTED_ORDERS: ProcedureDef = ProcedureDef {
    title: "Calculate Discounted Orders",
    sql: "CALL CalculateDiscountedOrders()",
};

#[cfg(test)]
mod tests {
    use super::{
        Catalog, MutationId, ProductField, ReportId, DISCOUNTED_ORDERS, MUTATIONS, REPORTS,
    };
    use crate::value::ParamKind;

    #[test]
    fn report_array_is_aligned_with_report_ids() {
        for (index, def) in REPORTS.iter().enumerate() {
            assert_eq!(def.id as usize, index, "misplaced report {:?}", def.id);
        }
        assert_eq!(ReportId::LowStock.def().title, "Low Stock");
    }

    #[test]
    fn mutation_array_is_aligned_with_mutation_ids() {
        for (index, def) in MUTATIONS.iter().enumerate() {
            assert_eq!(def.id as usize, index, "misplaced mutation {:?}", def.id);
        }
    }

    #[test]
    fn placeholder_counts_match_declared_parameters() {
        for def in &REPORTS {
            assert_eq!(
                def.sql.matches('?').count(),
                def.params.len(),
                "placeholder mismatch in {:?}",
                def.id
            );
            assert_eq!(def.params.len(), def.param_labels.len());
        }
        for def in &MUTATIONS {
            assert_eq!(
                def.sql.matches('?').count(),
                def.params.len(),
                "placeholder mismatch in {:?}",
                def.id
            );
            assert_eq!(def.params.len(), def.param_labels.len());
        }
    }

    #[test]
    fn every_report_declares_its_output_columns() {
        for def in &REPORTS {
            assert!(!def.columns.is_empty(), "{:?} declares no columns", def.id);
        }
    }

    #[test]
    fn both_catalogs_are_populated() {
        assert!(REPORTS
            .iter()
            .any(|def| def.catalog == Catalog::Management));
        assert!(
            REPORTS
                .iter()
                .filter(|def| def.catalog == Catalog::Analytics)
                .count()
                >= 20
        );
    }

    #[test]
    fn product_updates_are_limited_to_fixed_field_variants() {
        let fields = [
            ProductField::Name,
            ProductField::Category,
            ProductField::Price,
            ProductField::Stock,
        ];
        for field in fields {
            let sql = field.update_sql();
            assert!(sql.starts_with("UPDATE Product SET "));
            assert_eq!(sql.matches('?').count(), 2);
        }
        assert_eq!(ProductField::Price.value_kind(), ParamKind::Float);
        assert_eq!(ProductField::Stock.value_kind(), ParamKind::Int);
    }

    #[test]
    fn procedure_call_has_no_placeholders() {
        assert!(DISCOUNTED_ORDERS.sql.starts_with("CALL "));
        assert_eq!(DISCOUNTED_ORDERS.sql.matches('?').count(), 0);
    }

    #[test]
    fn mutations_reload_a_parameterless_management_report() {
        for def in &MUTATIONS {
            let reload = def.reload.def();
            assert_eq!(reload.catalog, Catalog::Management);
            // Reloads run with no supplied parameters after a mutation.
            assert!(reload.params.is_empty(), "{} reload takes params", def.title);
        }
        assert_eq!(MutationId::AddProduct.def().reload, ReportId::ProductList);
    }

    #[test]
    fn dashboard_revenue_stat_carries_the_currency_symbol() {
        let sql = ReportId::DashboardSummary.def().sql;
        assert!(sql.contains("CONCAT('₹'"));
    }
}
