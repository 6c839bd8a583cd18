use payloads::Role;

/// A sidebar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub path: &'static str,
    pub label: &'static str,
}

const HOME: NavLink = NavLink {
    path: "/",
    label: "Bosh sahifa",
};
const COMPANIES: NavLink = NavLink {
    path: "/company",
    label: "Kompaniyalar",
};
const ROPS: NavLink = NavLink {
    path: "/rop",
    label: "Boshqaruvchilar",
};
const SALES_MANAGERS: NavLink = NavLink {
    path: "/salesmanager",
    label: "Sotuv operatorlari",
};
pub const SETTINGS: NavLink = NavLink {
    path: "/settings",
    label: "Sozlamalar",
};

/// Entries visible to `role`, in sidebar order.
pub fn links_for(role: Role) -> &'static [NavLink] {
    match role {
        Role::SuperAdmin => &[HOME, COMPANIES, ROPS, SALES_MANAGERS],
        Role::Rop => &[HOME, SALES_MANAGERS],
        Role::SalesManager => &[HOME],
    }
}

/// Whether `role` may open a page below `path`. Settings is open to all.
pub fn may_visit(role: Role, path: &str) -> bool {
    if path.starts_with(SETTINGS.path) {
        return true;
    }
    links_for(role).iter().any(|link| {
        if link.path == "/" {
            path == "/"
        } else {
            path == link.path || path.starts_with(&format!("{}/", link.path))
        }
    })
}
